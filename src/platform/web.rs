//! Browser frame scheduling via `requestAnimationFrame`

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::FrameScheduler;

/// Schedules frames with `window.requestAnimationFrame`
///
/// Each request gets its own generation number, which is handed back to the
/// frame callback so the driver can tell a stale callback from the live one.
/// Must be bound with [`AnimationFrameScheduler::bind`] before the first
/// request.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    on_frame: Option<Rc<dyn Fn(u64, f64)>>,
    next_generation: u64,
    /// Generation and rAF id of the latest request
    in_flight: Option<(u64, i32)>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the frame callback (receives the request generation and the
    /// rAF timestamp in ms)
    pub fn bind(&mut self, on_frame: impl Fn(u64, f64) + 'static) {
        self.on_frame = Some(Rc::new(on_frame));
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        let Some(on_frame) = self.on_frame.clone() else {
            log::warn!("Frame requested before the scheduler was bound");
            return None;
        };
        let window = web_sys::window()?;

        self.next_generation += 1;
        let generation = self.next_generation;
        // Freed by wasm-bindgen after its single call
        let callback = Closure::once_into_js(move |time: f64| on_frame(generation, time));

        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => {
                self.in_flight = Some((generation, id));
                Some(generation)
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: u64) {
        let Some((generation, id)) = self.in_flight else {
            return;
        };
        if generation != handle {
            return;
        }
        self.in_flight = None;
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}
