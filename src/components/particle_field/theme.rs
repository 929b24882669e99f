//! Visual and physical tuning for the particle field.
//!
//! Every constant the simulation depends on lives in [`FieldStyle`]. Two
//! presets are provided: a calm [`FieldStyle::baseline`] and the default
//! [`FieldStyle::enhanced`] with hue cycling and opacity response to the
//! pointer. Styles deserialize from partial JSON, falling back to the chosen
//! preset for any field left out.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// HSLA color. Hue in degrees, saturation/lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	pub h: f64,
	pub s: f64,
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	pub fn to_css(self) -> String {
		format!(
			"hsla({:.1}, {:.0}%, {:.0}%, {:.3})",
			self.h, self.s, self.l, self.a
		)
	}
}

/// Named starting point for a [`FieldStyle`].
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
	/// Fewer, slower particles with fixed opacity and no hue cycling.
	Baseline,
	/// Denser field that brightens near the pointer and cycles its palette.
	#[default]
	Enhanced,
}

impl Preset {
	pub fn style(self) -> FieldStyle {
		match self {
			Preset::Baseline => FieldStyle::baseline(),
			Preset::Enhanced => FieldStyle::enhanced(),
		}
	}
}

/// Complete tuning for one particle field.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FieldStyle {
	/// Viewport pixels of width per particle.
	pub spacing_divisor: f64,
	/// Upper bound on particle count; keeps the pairwise link scan cheap.
	pub max_count: usize,
	/// Spawn velocity components are drawn from `[-speed, speed)`.
	pub speed: f64,
	/// Minimum particle radius.
	pub size_min: f64,
	/// Maximum particle radius.
	pub size_max: f64,
	/// Lower edge of the base hue band, in degrees.
	pub hue_min: f64,
	/// Width of the base hue band, in degrees.
	pub hue_span: f64,
	/// Saturation percent used for every particle.
	pub saturation: f64,
	/// Lightness percent used for every particle.
	pub lightness: f64,
	/// Lower bound of the spawn opacity range.
	pub spawn_opacity_min: f64,
	/// Upper bound of the spawn opacity range.
	pub spawn_opacity_max: f64,
	/// Opacity never drops below this.
	pub opacity_floor: f64,
	/// Opacity never rises above this.
	pub opacity_ceiling: f64,
	/// Per-frame opacity increase while inside the repulsion radius.
	pub opacity_rise: f64,
	/// Per-frame opacity decrease while outside the repulsion radius.
	pub opacity_decay: f64,
	/// Particles closer than this are joined by a line.
	pub link_distance: f64,
	/// Line alpha is `(link_distance - d) / link_alpha_divisor`.
	pub link_alpha_divisor: f64,
	/// Stroke width of connecting lines.
	pub link_width: f64,
	/// Multiply line alpha by the start particle's opacity.
	pub tint_links: bool,
	/// Pointer influence radius.
	pub repulsion_radius: f64,
	/// Impulse is `(repulsion_radius - d) / repulsion_damping`.
	pub repulsion_damping: f64,
	/// Degrees the shared hue offset advances per frame. Zero disables cycling.
	pub hue_rotation_step: f64,
	/// Duration of the canvas fade-in after mount.
	pub fade_in_ms: u32,
}

impl FieldStyle {
	/// Calm field: sparse, slow, fixed opacity, static palette.
	pub fn baseline() -> Self {
		Self {
			spacing_divisor: 10.0,
			max_count: 100,
			speed: 0.15,
			size_min: 0.5,
			size_max: 2.5,
			hue_min: 250.0,
			hue_span: 60.0,
			saturation: 70.0,
			lightness: 60.0,
			spawn_opacity_min: 0.1,
			spawn_opacity_max: 0.6,
			opacity_floor: 0.1,
			opacity_ceiling: 0.6,
			opacity_rise: 0.0,
			opacity_decay: 0.0,
			link_distance: 100.0,
			link_alpha_divisor: 1000.0,
			link_width: 0.5,
			tint_links: false,
			repulsion_radius: 120.0,
			repulsion_damping: 1500.0,
			hue_rotation_step: 0.0,
			fade_in_ms: 1000,
		}
	}

	/// Denser field with pointer-driven glow and a slowly cycling palette.
	pub fn enhanced() -> Self {
		Self {
			spacing_divisor: 8.0,
			max_count: 150,
			speed: 0.2,
			size_min: 0.5,
			size_max: 2.5,
			hue_min: 250.0,
			hue_span: 60.0,
			saturation: 100.0,
			lightness: 70.0,
			spawn_opacity_min: 0.2,
			spawn_opacity_max: 0.7,
			opacity_floor: 0.2,
			opacity_ceiling: 0.8,
			opacity_rise: 0.02,
			opacity_decay: 0.01,
			link_distance: 120.0,
			link_alpha_divisor: 1200.0,
			link_width: 0.6,
			tint_links: true,
			repulsion_radius: 150.0,
			repulsion_damping: 1500.0,
			hue_rotation_step: 0.1,
			fade_in_ms: 1000,
		}
	}

	/// Repair values that would break the field's invariants: swapped
	/// ranges, negative distances, non-finite numbers, and spawn opacities
	/// outside `[opacity_floor, opacity_ceiling]`.
	pub fn sanitized(mut self) -> Self {
		fn finite_non_negative(v: f64, fallback: f64) -> f64 {
			if v.is_finite() { v.max(0.0) } else { fallback }
		}
		fn ordered(a: f64, b: f64) -> (f64, f64) {
			if a <= b { (a, b) } else { (b, a) }
		}

		let defaults = Self::enhanced();
		self.spacing_divisor = finite_non_negative(self.spacing_divisor, defaults.spacing_divisor);
		self.speed = finite_non_negative(self.speed, defaults.speed);
		self.size_min = finite_non_negative(self.size_min, defaults.size_min);
		self.size_max = finite_non_negative(self.size_max, defaults.size_max);
		(self.size_min, self.size_max) = ordered(self.size_min, self.size_max);
		self.hue_min = if self.hue_min.is_finite() {
			self.hue_min.rem_euclid(360.0)
		} else {
			defaults.hue_min
		};
		self.hue_span = finite_non_negative(self.hue_span, defaults.hue_span).min(360.0);
		self.saturation = finite_non_negative(self.saturation, defaults.saturation).min(100.0);
		self.lightness = finite_non_negative(self.lightness, defaults.lightness).min(100.0);

		self.opacity_floor = finite_non_negative(self.opacity_floor, defaults.opacity_floor).min(1.0);
		self.opacity_ceiling =
			finite_non_negative(self.opacity_ceiling, defaults.opacity_ceiling).min(1.0);
		(self.opacity_floor, self.opacity_ceiling) = ordered(self.opacity_floor, self.opacity_ceiling);
		let (floor, ceiling) = (self.opacity_floor, self.opacity_ceiling);
		let clamp_opacity = |v: f64, fallback: f64| finite_non_negative(v, fallback).clamp(floor, ceiling);
		self.spawn_opacity_min = clamp_opacity(self.spawn_opacity_min, floor);
		self.spawn_opacity_max = clamp_opacity(self.spawn_opacity_max, ceiling);
		(self.spawn_opacity_min, self.spawn_opacity_max) =
			ordered(self.spawn_opacity_min, self.spawn_opacity_max);
		self.opacity_rise = finite_non_negative(self.opacity_rise, 0.0);
		self.opacity_decay = finite_non_negative(self.opacity_decay, 0.0);

		self.link_distance = finite_non_negative(self.link_distance, defaults.link_distance);
		self.link_alpha_divisor =
			finite_non_negative(self.link_alpha_divisor, defaults.link_alpha_divisor);
		self.link_width = finite_non_negative(self.link_width, defaults.link_width);
		self.repulsion_radius = finite_non_negative(self.repulsion_radius, defaults.repulsion_radius);
		self.repulsion_damping =
			finite_non_negative(self.repulsion_damping, defaults.repulsion_damping);
		self.hue_rotation_step = if self.hue_rotation_step.is_finite() {
			self.hue_rotation_step.rem_euclid(360.0)
		} else {
			0.0
		};
		self
	}

	/// Color for a particle with the given base hue and opacity.
	pub fn color(&self, hue: f64, opacity: f64) -> Hsla {
		Hsla::new(hue, self.saturation, self.lightness, opacity)
	}

	pub fn hue_band(&self) -> Range<f64> {
		self.hue_min..self.hue_min + self.hue_span
	}
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self::enhanced()
	}
}

/// Style as read from page configuration: a preset plus optional overrides.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	pub preset: Preset,
	#[serde(flatten)]
	pub overrides: serde_json::Map<String, serde_json::Value>,
}

impl FieldConfig {
	/// Resolve into a concrete style: the preset's values, then any overrides.
	pub fn resolve(&self) -> Result<FieldStyle, serde_json::Error> {
		let mut merged = match serde_json::to_value(self.preset.style())? {
			serde_json::Value::Object(map) => map,
			_ => serde_json::Map::new(),
		};
		merged.extend(self.overrides.clone());
		let style: FieldStyle = serde_json::from_value(serde_json::Value::Object(merged))?;
		Ok(style.sanitized())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_is_hsla() {
		let css = Hsla::new(250.0, 100.0, 70.0, 0.8).to_css();
		assert_eq!(css, "hsla(250.0, 100%, 70%, 0.800)");
	}

	#[test]
	fn presets_keep_spawn_opacity_inside_bounds() {
		for style in [FieldStyle::baseline(), FieldStyle::enhanced()] {
			assert!(style.opacity_floor <= style.spawn_opacity_min);
			assert!(style.spawn_opacity_max <= style.opacity_ceiling);
			assert_eq!(style.clone().sanitized(), style);
		}
	}

	#[test]
	fn partial_json_falls_back_to_enhanced() {
		let style: FieldStyle = serde_json::from_str(r#"{ "link_distance": 90.0 }"#).unwrap();
		assert_eq!(style.link_distance, 90.0);
		assert_eq!(style.max_count, 150);
	}

	#[test]
	fn config_applies_overrides_on_top_of_preset() {
		let config: FieldConfig =
			serde_json::from_str(r#"{ "preset": "baseline", "max_count": 40 }"#).unwrap();
		let style = config.resolve().unwrap();
		assert_eq!(style.max_count, 40);
		assert_eq!(style.spacing_divisor, 10.0);
		assert_eq!(style.hue_rotation_step, 0.0);
	}

	#[test]
	fn empty_config_resolves_to_enhanced() {
		let config: FieldConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.resolve().unwrap(), FieldStyle::enhanced());
	}

	#[test]
	fn sanitize_repairs_swapped_and_negative_values() {
		let style = FieldStyle {
			size_min: 3.0,
			size_max: 1.0,
			opacity_floor: 0.9,
			opacity_ceiling: 0.3,
			spawn_opacity_min: 0.0,
			spawn_opacity_max: 1.0,
			link_distance: -5.0,
			speed: f64::NAN,
			..FieldStyle::enhanced()
		}
		.sanitized();

		assert_eq!((style.size_min, style.size_max), (1.0, 3.0));
		assert_eq!((style.opacity_floor, style.opacity_ceiling), (0.3, 0.9));
		assert_eq!((style.spawn_opacity_min, style.spawn_opacity_max), (0.3, 0.9));
		assert_eq!(style.link_distance, 0.0);
		assert_eq!(style.speed, FieldStyle::enhanced().speed);
	}
}
