//! Kiosk operating status.
//!
//! One status value drives everything the storefront shows about
//! availability: the badge label, the banner, whether quantity controls and
//! checkout are enabled, and whether the blocking overlay is up.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown on the overlay when the status has no banner of its own.
pub const OVERLAY_FALLBACK_MESSAGE: &str = "Please check back soon.";

/// Operating status of the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KioskStatus {
    /// Purchasing is enabled.
    #[default]
    Live,
    /// Catalog visible, purchasing disabled.
    Maintenance,
    /// Storefront replaced by a blocking overlay.
    OutOfService,
}

/// Error returned when parsing a status value outside the three known ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid kiosk status: {0}")]
pub struct UnknownStatus(pub String);

/// Display metadata for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMeta {
    /// Badge label.
    pub label: &'static str,
    /// Banner text, if the status shows a banner.
    pub banner: Option<&'static str>,
}

impl KioskStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Live, Self::Maintenance, Self::OutOfService];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Maintenance => "maintenance",
            Self::OutOfService => "out_of_service",
        }
    }

    /// Whether quantity controls and checkout are enabled.
    #[must_use]
    pub const fn allows_purchasing(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Whether the full-screen overlay replaces the storefront.
    #[must_use]
    pub const fn blocks_storefront(&self) -> bool {
        matches!(self, Self::OutOfService)
    }

    /// Badge and banner text.
    #[must_use]
    pub const fn meta(&self) -> StatusMeta {
        match self {
            Self::Live => StatusMeta {
                label: "Live",
                banner: None,
            },
            Self::Maintenance => StatusMeta {
                label: "Maintenance",
                banner: Some("Machine is under maintenance."),
            },
            Self::OutOfService => StatusMeta {
                label: "Out of Service",
                banner: Some("This unit is currently unavailable."),
            },
        }
    }

    /// Everything the storefront renders for this status.
    #[must_use]
    pub fn view(&self) -> StatusView {
        let meta = self.meta();
        StatusView {
            status: *self,
            label: meta.label,
            banner: meta.banner,
            overlay: self.blocks_storefront().then(|| OverlayView {
                title: meta.label,
                message: meta.banner.unwrap_or(OVERLAY_FALLBACK_MESSAGE),
            }),
            controls_enabled: self.allows_purchasing(),
        }
    }
}

impl std::fmt::Display for KioskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KioskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Self::Live),
            "maintenance" => Ok(Self::Maintenance),
            "out_of_service" => Ok(Self::OutOfService),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

/// Rendered status: badge, banner and overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub status: KioskStatus,
    pub label: &'static str,
    pub banner: Option<&'static str>,
    /// Present only when the storefront is blocked.
    pub overlay: Option<OverlayView>,
    /// Quantity buttons and checkout.
    pub controls_enabled: bool,
}

/// Full-screen overlay content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayView {
    pub title: &'static str,
    pub message: &'static str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_wire_names() {
        for status in KioskStatus::ALL {
            assert_eq!(status.as_str().parse::<KioskStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "paused".parse::<KioskStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("paused".to_string()));
        assert!("LIVE".parse::<KioskStatus>().is_err());
    }

    #[test]
    fn test_only_live_allows_purchasing() {
        assert!(KioskStatus::Live.allows_purchasing());
        assert!(!KioskStatus::Maintenance.allows_purchasing());
        assert!(!KioskStatus::OutOfService.allows_purchasing());
    }

    #[test]
    fn test_maintenance_view_has_banner_but_no_overlay() {
        let view = KioskStatus::Maintenance.view();
        assert_eq!(view.label, "Maintenance");
        assert_eq!(view.banner, Some("Machine is under maintenance."));
        assert!(view.overlay.is_none());
        assert!(!view.controls_enabled);
    }

    #[test]
    fn test_out_of_service_view_shows_overlay() {
        let view = KioskStatus::OutOfService.view();
        let overlay = view.overlay.unwrap();
        assert_eq!(overlay.title, "Out of Service");
        assert_eq!(overlay.message, "This unit is currently unavailable.");
        assert!(!view.controls_enabled);
    }

    #[test]
    fn test_live_view_is_plain() {
        let view = KioskStatus::Live.view();
        assert_eq!(view.banner, None);
        assert!(view.overlay.is_none());
        assert!(view.controls_enabled);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&KioskStatus::OutOfService).unwrap_or_default();
        assert_eq!(json, "\"out_of_service\"");
    }
}
