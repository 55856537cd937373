//! Reader settings, grouped into named profiles, and the read-only view of
//! them that the viewport controller consumes.

mod store;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use store::{
    open_profiles_in, open_user_profiles, FileProfileStorage, MemoryProfileStorage,
    ProfileStorage, Profiles, SettingsError, SettingsResult, SettingsStore, DEFAULT_PROFILE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoomMode {
    #[serde(rename = "zoomFitToScreen")]
    FitToScreen,
    #[serde(rename = "zoomFitToWidth")]
    FitToWidth,
    #[serde(rename = "zoomFitToHeight")]
    #[default]
    FitToHeight,
    #[serde(rename = "zoomOriginal")]
    Original,
    #[serde(rename = "keepZoom")]
    KeepZoom,
    #[serde(rename = "keepZoomStart")]
    KeepZoomStart,
}

/// Target page height, in pixels, for fit-to-height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HeightSize {
    #[serde(rename = "1200")]
    Px1200,
    #[serde(rename = "1300")]
    Px1300,
    #[serde(rename = "1400")]
    #[default]
    Px1400,
    #[serde(rename = "1500")]
    Px1500,
    #[serde(rename = "1600")]
    Px1600,
}

impl HeightSize {
    pub const fn pixels(self) -> u32 {
        match self {
            Self::Px1200 => 1200,
            Self::Px1300 => 1300,
            Self::Px1400 => 1400,
            Self::Px1500 => 1500,
            Self::Px1600 => 1600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontSize {
    #[serde(rename = "auto")]
    #[default]
    Auto,
    #[serde(rename = "9")]
    Px9,
    #[serde(rename = "10")]
    Px10,
    #[serde(rename = "11")]
    Px11,
    #[serde(rename = "12")]
    Px12,
    #[serde(rename = "14")]
    Px14,
    #[serde(rename = "16")]
    Px16,
    #[serde(rename = "18")]
    Px18,
    #[serde(rename = "20")]
    Px20,
    #[serde(rename = "24")]
    Px24,
    #[serde(rename = "32")]
    Px32,
    #[serde(rename = "40")]
    Px40,
    #[serde(rename = "48")]
    Px48,
    #[serde(rename = "60")]
    Px60,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TriggerMethod {
    RightClick,
    DoubleTap,
    Both,
    #[default]
    Neither,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeDefaults {
    pub right_to_left: bool,
    pub single_page_view: bool,
    pub has_cover: bool,
}

impl Default for VolumeDefaults {
    fn default() -> Self {
        Self {
            right_to_left: true,
            single_page_view: true,
            has_cover: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnkiConnectSettings {
    pub enabled: bool,
    pub server_address: String,
    pub picture_field: String,
    pub sentence_field: String,
    pub crop_image: bool,
    pub overwrite_image: bool,
    pub grab_sentence: bool,
    pub trigger_method: TriggerMethod,
}

impl Default for AnkiConnectSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            server_address: "http://127.0.0.1:8765".to_string(),
            picture_field: "Picture".to_string(),
            sentence_field: "Sentence".to_string(),
            crop_image: false,
            overwrite_image: true,
            grab_sentence: false,
            trigger_method: TriggerMethod::Neither,
        }
    }
}

/// One profile's worth of reader settings.
///
/// Every field falls back to its default when missing from persisted data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub default_fullscreen: bool,
    pub disable_mouse_pan: bool,
    pub disable_arrow_keys: bool,
    #[serde(rename = "disableDMinZoom")]
    pub disable_dynamic_min_zoom: bool,
    pub text_editable: bool,
    pub text_box_borders: bool,
    #[serde(rename = "displayOCR")]
    pub display_ocr: bool,
    #[serde(rename = "alwaysShowOCR")]
    pub always_show_ocr: bool,
    pub bold_font: bool,
    pub page_num: bool,
    pub char_count: bool,
    pub bounds: bool,
    pub mobile: bool,
    pub background_color: String,
    pub swipe_threshold: u32,
    pub edge_button_width: u32,
    pub show_timer: bool,
    pub quick_actions: bool,
    pub height_size: HeightSize,
    pub font_size: FontSize,
    pub zoom_default: ZoomMode,
    pub invert_colors: bool,
    pub volume_defaults: VolumeDefaults,
    pub anki_connect_settings: AnkiConnectSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_fullscreen: false,
            disable_mouse_pan: true,
            disable_arrow_keys: false,
            disable_dynamic_min_zoom: false,
            text_editable: false,
            text_box_borders: false,
            display_ocr: true,
            always_show_ocr: false,
            bold_font: false,
            page_num: true,
            char_count: false,
            bounds: true,
            mobile: false,
            background_color: "#282828".to_string(),
            swipe_threshold: 50,
            edge_button_width: 40,
            show_timer: false,
            quick_actions: true,
            height_size: HeightSize::default(),
            font_size: FontSize::default(),
            zoom_default: ZoomMode::default(),
            invert_colors: false,
            volume_defaults: VolumeDefaults::default(),
            anki_connect_settings: AnkiConnectSettings::default(),
        }
    }
}

/// The subset of settings the viewport controller reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerConfig {
    pub disable_mouse_pan: bool,
    pub disable_arrow_keys: bool,
    pub bounds: bool,
    pub mobile: bool,
    pub zoom_default: ZoomMode,
    pub height_size: HeightSize,
}

impl ViewerConfig {
    /// Bounds enforcement runs in mobile mode or when explicitly enabled.
    pub const fn enforces_bounds(&self) -> bool {
        self.mobile || self.bounds
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Settings::default().viewer_config()
    }
}

impl Settings {
    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            disable_mouse_pan: self.disable_mouse_pan,
            disable_arrow_keys: self.disable_arrow_keys,
            bounds: self.bounds,
            mobile: self.mobile,
            zoom_default: self.zoom_default,
            height_size: self.height_size,
        }
    }
}

/// Read-only configuration consulted by the viewport controller.
pub trait ConfigSource {
    fn viewer_config(&self) -> ViewerConfig;
}

impl ConfigSource for ViewerConfig {
    fn viewer_config(&self) -> ViewerConfig {
        *self
    }
}

impl ConfigSource for Settings {
    fn viewer_config(&self) -> ViewerConfig {
        Settings::viewer_config(self)
    }
}

impl<S: ProfileStorage> ConfigSource for SettingsStore<S> {
    fn viewer_config(&self) -> ViewerConfig {
        self.settings().viewer_config()
    }
}

impl<T: ConfigSource> ConfigSource for Rc<RefCell<T>> {
    fn viewer_config(&self) -> ViewerConfig {
        self.borrow().viewer_config()
    }
}
