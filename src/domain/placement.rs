//! Design placement and the record handed to fulfillment
//!
//! A placement is always stored in canonical units so a layout made on a
//! phone reproduces identically on a desktop and on the supplier's print file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use utoipa::ToSchema;

use super::geometry::{CanonicalRect, Position, Size, GEOMETRY_EPSILON, MIN_SIZE};

/// Reasons a candidate placement is refused
#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    #[error("Design extends outside print area: left={0}, right={1}, area=[{2}, {3}]")]
    OutOfBoundsHorizontal(f64, f64, f64, f64),
    #[error("Design extends outside print area: top={0}, bottom={1}, area=[{2}, {3}]")]
    OutOfBoundsVertical(f64, f64, f64, f64),
    #[error("Design smaller than minimum size: width={0}, height={1}, min={2}x{3}")]
    BelowMinimumSize(f64, f64, f64, f64),
    #[error("Design geometry is not finite")]
    NonFinite,
}

/// Garment side a template prints on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlacementType {
    #[default]
    Front,
    Back,
    SleeveLeft,
    SleeveRight,
}

/// Minimum design size allowed inside `area`
///
/// Normally `MIN_SIZE` on both axes. A print area narrower than that lowers
/// the floor to its own dimension so containment can still hold.
pub fn effective_min_size(area: &CanonicalRect) -> Size {
    Size::new(MIN_SIZE.min(area.width), MIN_SIZE.min(area.height))
}

/// Current position and size of the design overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DesignPlacement {
    pub position: Position,
    pub size: Size,
}

impl DesignPlacement {
    pub fn new(position: Position, size: Size) -> Self {
        DesignPlacement { position, size }
    }

    /// Centered placement at half the print area's size
    pub fn centered_in(area: &CanonicalRect) -> Self {
        DesignPlacement {
            position: Position::new(area.x + area.width / 4.0, area.y + area.height / 4.0),
            size: Size::new(area.width / 2.0, area.height / 2.0),
        }
    }

    pub fn rect(&self) -> CanonicalRect {
        CanonicalRect::from_parts(self.position, self.size)
    }

    /// Check containment in `area` and the minimum size floor
    pub fn validate(&self, area: &CanonicalRect) -> Result<(), PlacementError> {
        let rect = self.rect();
        if !rect.is_finite() {
            return Err(PlacementError::NonFinite);
        }

        let min = effective_min_size(area);
        if rect.width < min.width - GEOMETRY_EPSILON || rect.height < min.height - GEOMETRY_EPSILON {
            return Err(PlacementError::BelowMinimumSize(
                rect.width,
                rect.height,
                min.width,
                min.height,
            ));
        }

        if rect.x < area.x - GEOMETRY_EPSILON || rect.right() > area.right() + GEOMETRY_EPSILON {
            return Err(PlacementError::OutOfBoundsHorizontal(
                rect.x,
                rect.right(),
                area.x,
                area.right(),
            ));
        }

        if rect.y < area.y - GEOMETRY_EPSILON || rect.bottom() > area.bottom() + GEOMETRY_EPSILON {
            return Err(PlacementError::OutOfBoundsVertical(
                rect.y,
                rect.bottom(),
                area.y,
                area.bottom(),
            ));
        }

        Ok(())
    }
}

/// Operator-supplied artwork reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DesignImage {
    /// Loadable image URL (http(s), data, blob or file)
    pub url: String,
    /// Original file name, if the image came from a local upload
    #[serde(default)]
    pub file_name: Option<String>,
}

impl DesignImage {
    const ALLOWED_SCHEMES: [&'static str; 5] = ["http", "https", "data", "blob", "file"];

    /// Parse and validate an image reference
    pub fn parse(url: &str, file_name: Option<String>) -> Result<Self, String> {
        let parsed = url::Url::parse(url).map_err(|e| format!("invalid design url: {}", e))?;
        if !Self::ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return Err(format!("unsupported design url scheme: {}", parsed.scheme()));
        }

        Ok(DesignImage {
            url: url.to_string(),
            file_name: file_name.filter(|name| !name.trim().is_empty()),
        })
    }
}

/// Template metadata carried along with a placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub product_type: String,
    pub placement: PlacementType,
    pub mockup_url: String,
}

/// Print-on-demand order position object
///
/// Integer canonical units, with the design offset measured from the print
/// area's own origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FulfillmentPosition {
    pub area_width: i32,
    pub area_height: i32,
    pub width: i32,
    pub height: i32,
    pub top: i32,
    pub left: i32,
}

impl FulfillmentPosition {
    pub fn from_rects(placement: &CanonicalRect, area: &CanonicalRect) -> Self {
        FulfillmentPosition {
            area_width: area.width.round() as i32,
            area_height: area.height.round() as i32,
            width: placement.width.round() as i32,
            height: placement.height.round() as i32,
            top: (placement.y - area.y).round() as i32,
            left: (placement.x - area.x).round() as i32,
        }
    }
}

/// Final placement bundle submitted with a new product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlacementRecord {
    pub template: TemplateSummary,
    pub design: DesignImage,
    /// Design rectangle in canonical units
    pub placement: CanonicalRect,
    /// Print area the placement was constrained to
    pub print_area: CanonicalRect,
    /// Print area as supplied by the template, before viewport adjustment
    pub original_print_area: CanonicalRect,
    pub fulfillment: FulfillmentPosition,
    /// SHA-256 over template, design and rectangle
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

impl PlacementRecord {
    pub fn package(
        template: TemplateSummary,
        design: DesignImage,
        placement: CanonicalRect,
        print_area: CanonicalRect,
        original_print_area: CanonicalRect,
    ) -> Self {
        let fulfillment = FulfillmentPosition::from_rects(&placement, &print_area);
        let checksum = Self::checksum(&template.id, &design.url, &placement);

        PlacementRecord {
            template,
            design,
            placement,
            print_area,
            original_print_area,
            fulfillment,
            checksum,
            created_at: Utc::now(),
        }
    }

    fn checksum(template_id: &str, design_url: &str, rect: &CanonicalRect) -> String {
        let mut hasher = Sha256::new();
        hasher.update(template_id.as_bytes());
        hasher.update(b"\n");
        hasher.update(design_url.as_bytes());
        hasher.update(b"\n");
        hasher.update(
            format!("{:.3},{:.3},{:.3},{:.3}", rect.x, rect.y, rect.width, rect.height).as_bytes(),
        );
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> TemplateSummary {
        TemplateSummary {
            id: "white_tee_front".to_string(),
            name: "White Tee".to_string(),
            product_type: "tshirt".to_string(),
            placement: PlacementType::Front,
            mockup_url: "https://cdn.example.com/white_tee_front.png".to_string(),
        }
    }

    #[test]
    fn test_centered_placement() {
        let area = CanonicalRect::new(1000.0, 800.0, 1000.0, 1300.0);
        let placement = DesignPlacement::centered_in(&area);

        assert_eq!(placement.position, Position::new(1250.0, 1125.0));
        assert_eq!(placement.size, Size::new(500.0, 650.0));
        assert!(placement.validate(&area).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let area = CanonicalRect::new(100.0, 100.0, 500.0, 500.0);

        let too_far_right = DesignPlacement::new(Position::new(450.0, 150.0), Size::new(200.0, 200.0));
        assert!(matches!(
            too_far_right.validate(&area),
            Err(PlacementError::OutOfBoundsHorizontal(..))
        ));

        let too_high = DesignPlacement::new(Position::new(150.0, 50.0), Size::new(200.0, 200.0));
        assert!(matches!(
            too_high.validate(&area),
            Err(PlacementError::OutOfBoundsVertical(..))
        ));
    }

    #[test]
    fn test_validate_rejects_below_minimum() {
        let area = CanonicalRect::new(100.0, 100.0, 500.0, 500.0);
        let tiny = DesignPlacement::new(Position::new(150.0, 150.0), Size::new(49.0, 200.0));
        assert!(matches!(tiny.validate(&area), Err(PlacementError::BelowMinimumSize(..))));

        let nan = DesignPlacement::new(Position::new(f64::NAN, 150.0), Size::new(100.0, 100.0));
        assert_eq!(nan.validate(&area), Err(PlacementError::NonFinite));
    }

    #[test]
    fn test_narrow_area_lowers_floor() {
        let sliver = CanonicalRect::new(0.0, 0.0, 30.0, 400.0);
        assert_eq!(effective_min_size(&sliver), Size::new(30.0, MIN_SIZE));

        let placement = DesignPlacement::new(Position::new(0.0, 0.0), Size::new(30.0, 60.0));
        assert!(placement.validate(&sliver).is_ok());
    }

    #[test]
    fn test_design_image_parse() {
        assert!(DesignImage::parse("https://cdn.example.com/art.png", None).is_ok());
        assert!(DesignImage::parse("data:image/png;base64,AAAA", None).is_ok());
        assert!(DesignImage::parse("not a url", None).is_err());
        assert!(DesignImage::parse("ftp://example.com/art.png", None).is_err());

        let image = DesignImage::parse("blob:https://admin.example.com/1f2e", Some("  ".to_string()))
            .unwrap();
        assert_eq!(image.file_name, None);
    }

    #[test]
    fn test_fulfillment_position_is_relative_to_area() {
        let area = CanonicalRect::new(1000.0, 840.0, 1000.0, 1300.0);
        let placement = CanonicalRect::new(1250.4, 1165.0, 500.0, 649.6);
        let position = FulfillmentPosition::from_rects(&placement, &area);

        assert_eq!(
            position,
            FulfillmentPosition {
                area_width: 1000,
                area_height: 1300,
                width: 500,
                height: 650,
                top: 325,
                left: 250,
            }
        );
    }

    #[test]
    fn test_record_checksum_tracks_geometry() {
        let design = DesignImage::parse("https://cdn.example.com/art.png", None).unwrap();
        let area = CanonicalRect::new(1000.0, 800.0, 1000.0, 1300.0);
        let a = PlacementRecord::package(
            summary(),
            design.clone(),
            CanonicalRect::new(1250.0, 1125.0, 500.0, 650.0),
            area,
            area,
        );
        let b = PlacementRecord::package(
            summary(),
            design.clone(),
            CanonicalRect::new(1250.0, 1125.0, 500.0, 650.0),
            area,
            area,
        );
        let c = PlacementRecord::package(
            summary(),
            design,
            CanonicalRect::new(1251.0, 1125.0, 500.0, 650.0),
            area,
            area,
        );

        assert_eq!(a.checksum, b.checksum);
        assert_ne!(a.checksum, c.checksum);
        assert_eq!(a.checksum.len(), 64);
    }
}
