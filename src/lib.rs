//! particle-field: Interactive particle background for a single-page portfolio.
//!
//! This crate provides a WASM-based canvas component that renders drifting,
//! pointer-reactive particles joined by faint proximity lines, plus a small
//! page shell that layers content over it.

// Enables the `js` backend of `getrandom` for `rand` on wasm32.
use getrandom as _;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, FieldStyle, ParticleField, Preset};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Parse field configuration JSON into a style.
///
/// Accepts a partial object such as `{ "preset": "baseline", "max_count": 60 }`.
pub fn parse_field_config(json_text: &str) -> Result<FieldStyle, serde_json::Error> {
	serde_json::from_str::<FieldConfig>(json_text)?.resolve()
}

/// Load field configuration from a script element with id="particle-config".
/// Falls back to the default style when the element is absent or invalid.
pub fn load_field_config() -> FieldStyle {
	let Some(json_text) = read_config_script() else {
		return FieldStyle::default();
	};

	match parse_field_config(&json_text) {
		Ok(style) => {
			info!(
				"particle-field: loaded config (cap {}, link distance {})",
				style.max_count, style.link_distance
			);
			style
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			FieldStyle::default()
		}
	}
}

fn read_config_script() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Loads field configuration from the DOM and layers the page over the field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleField config=config />
		<main class="portfolio">
			<section id="home" class="hero">
				<h1>"Hello, I build things for the web."</h1>
				<p class="subtitle">"Move the pointer across the page to stir the field."</p>
			</section>
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_json_selects_preset_and_overrides() {
		let style = parse_field_config(r#"{ "preset": "baseline", "link_distance": 80 }"#).unwrap();
		assert_eq!(style.spacing_divisor, 10.0);
		assert_eq!(style.link_distance, 80.0);
	}

	#[test]
	fn config_json_is_sanitized() {
		let style = parse_field_config(r#"{ "opacity_floor": 0.9, "opacity_ceiling": 0.1 }"#).unwrap();
		assert!(style.opacity_floor <= style.opacity_ceiling);
	}

	#[test]
	fn malformed_config_is_an_error() {
		assert!(parse_field_config("{ not json").is_err());
		assert!(parse_field_config(r#"{ "preset": "sparkly" }"#).is_err());
		assert!(parse_field_config(r#"{ "max_count": "many" }"#).is_err());
	}
}
