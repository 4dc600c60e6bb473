use matcap_text::SceneConfig;

fn main() -> anyhow::Result<()> {
    matcap_text::run(SceneConfig::default())
}
