//! Background asset loading that reports back through the event loop.

use std::fmt::Debug;

use winit::event_loop::EventLoopProxy;

use crate::config::SceneConfig;
use crate::flow::FlowEvent;
use crate::text::Font;

/// Delivered to the event loop once per requested asset.
pub enum AssetEvent {
    Matcap {
        slot: usize,
        image: anyhow::Result<image::DynamicImage>,
    },
    Font(anyhow::Result<Font>),
}

impl Debug for AssetEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matcap { slot, image } => f
                .debug_struct("Matcap")
                .field("slot", slot)
                .field("ok", &image.is_ok())
                .finish(),
            Self::Font(font) => f.debug_tuple("Font").field(&font.is_ok()).finish(),
        }
    }
}

pub struct AssetLoader {
    proxy: EventLoopProxy<FlowEvent>,
    #[cfg(not(target_arch = "wasm32"))]
    runtime: tokio::runtime::Handle,
}

impl AssetLoader {
    pub fn new(
        proxy: EventLoopProxy<FlowEvent>,
        #[cfg(not(target_arch = "wasm32"))] runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            proxy,
            #[cfg(not(target_arch = "wasm32"))]
            runtime,
        }
    }

    /// Requests every matcap a material samples and reports the rest.
    pub fn load_matcaps(&self, config: &SceneConfig) {
        for slot in config.unused_matcaps() {
            log::debug!(
                "matcap {slot} ({}) is not used by any material, skipping",
                config.matcaps[slot]
            );
        }
        for slot in config.used_matcaps() {
            let file_name = config.matcaps[slot].clone();
            self.spawn(async move {
                let image = super::load_matcap_image(&file_name).await;
                AssetEvent::Matcap { slot, image }
            });
        }
    }

    pub fn load_font(&self, file_name: &str) {
        let file_name = file_name.to_string();
        self.spawn(async move { AssetEvent::Font(super::load_font(&file_name).await) });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn<F>(&self, fut: F)
    where
        F: std::future::Future<Output = AssetEvent> + Send + 'static,
    {
        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            let event = fut.await;
            if let Err(err) = proxy.send_event(FlowEvent::Asset(event)) {
                log::debug!("event loop closed before {:?} arrived", err.0);
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn<F>(&self, fut: F)
    where
        F: std::future::Future<Output = AssetEvent> + 'static,
    {
        let proxy = self.proxy.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let event = fut.await;
            if let Err(err) = proxy.send_event(FlowEvent::Asset(event)) {
                log::debug!("event loop closed before {:?} arrived", err.0);
            }
        });
    }
}
