pub mod inspect;
pub mod runner;

pub use inspect::Inspection;
pub use runner::SimRunner;

use std::cell::RefCell;

use gravity_engine::{Color, InputEvent, SimConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. `None` (and a warning) before `sim_init`.
fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("simulation not initialized, call sim_init() first");
                None
            }
        }
    })
}

/// Create the simulation from a JSON config (`"{}"` for defaults).
#[wasm_bindgen]
pub fn sim_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SimConfig::from_json(config_json)
        .and_then(SimRunner::new)
        .map_err(|e| {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
            JsValue::from_str(&e.to_string())
        })?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("gravity: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sim_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn sim_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn sim_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn sim_wheel(delta: f32, x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { delta, x, y }));
}

#[wasm_bindgen]
pub fn sim_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

/// Queue a body on a circular orbit around the primary.
/// Returns false if the request is invalid; the reason is logged.
#[wasm_bindgen]
pub fn sim_add_body(name: &str, distance_au: f64, radius_px: f64, color_hex: &str) -> bool {
    with_runner(|r| {
        let requested = Color::from_hex(color_hex)
            .and_then(|color| r.request_add_body(name, distance_au, radius_px, color));
        match requested {
            Ok(()) => true,
            Err(e) => {
                log::warn!("add body '{name}' rejected: {e}");
                false
            }
        }
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn sim_reset() {
    with_runner(|r| r.request_reset());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

/// Capacity of the instance buffer; the host sizes its view from this.
#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

/// Every body as a JSON array.
#[wasm_bindgen]
pub fn get_snapshot_json() -> String {
    with_runner(|r| r.snapshot_json())
        .and_then(|json| json.map_err(|e| log::warn!("snapshot: {e}")).ok())
        .unwrap_or_else(|| "[]".to_owned())
}

/// The inspection panel for the selected body, or `null`.
#[wasm_bindgen]
pub fn get_selection_json() -> String {
    with_runner(|r| r.selection_json())
        .and_then(|json| json.map_err(|e| log::warn!("selection: {e}")).ok())
        .unwrap_or_else(|| "null".to_owned())
}
