use crate::constants::MASTER_GAIN;
use flapboard_core::AudioSink;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// WebAudio backend: every click is a fresh buffer source feeding one shared
/// compressor, then a master gain, then the destination.
pub struct WebAudioSink {
    ctx: web::AudioContext,
    compressor: web::DynamicsCompressorNode,
    _master: web::GainNode,
}

fn js_err(e: impl std::fmt::Debug) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(js_err(e))
        }
    }
}

impl WebAudioSink {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(js_err)?;
        _ = ctx.resume();
        let compressor = web::DynamicsCompressorNode::new(&ctx).map_err(|e| {
            log::error!("DynamicsCompressorNode error: {:?}", e);
            js_err(e)
        })?;
        let master = create_gain(&ctx, MASTER_GAIN, "Master")?;
        _ = compressor.connect_with_audio_node(&master);
        _ = master.connect_with_audio_node(&ctx.destination());
        Ok(Self {
            ctx,
            compressor,
            _master: master,
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }
}

impl AudioSink for WebAudioSink {
    type Clip = web::AudioBuffer;
    type Track = web::AudioBufferSourceNode;

    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn schedule_one_shot(
        &mut self,
        clip: &web::AudioBuffer,
        start_time: f64,
        playback_rate: f64,
    ) -> Option<web::AudioBufferSourceNode> {
        let src = match web::AudioBufferSourceNode::new(&self.ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("AudioBufferSourceNode error: {:?}", e);
                return None;
            }
        };
        src.set_buffer(Some(clip));
        src.playback_rate().set_value(playback_rate as f32);
        _ = src.connect_with_audio_node(&self.compressor);
        if let Err(e) = src.start_with_when(start_time) {
            log::error!("click start error: {:?}", e);
            _ = src.disconnect();
            return None;
        }
        Some(src)
    }

    #[allow(deprecated)]
    fn stop_all(&mut self, tracks: Vec<web::AudioBufferSourceNode>) {
        for t in tracks {
            // throws when the source already ended; nothing to do then
            _ = t.stop();
            _ = t.disconnect();
        }
    }
}

/// Fetch and decode the click sample.
pub async fn load_clip(ctx: &web::AudioContext, url: &str) -> anyhow::Result<web::AudioBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let bytes = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let array: js_sys::ArrayBuffer = bytes.dyn_into().map_err(js_err)?;
    let decoded = JsFuture::from(ctx.decode_audio_data(&array).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    decoded.dyn_into::<web::AudioBuffer>().map_err(js_err)
}
