use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use proj4rs::proj::Proj;

use crate::errors::{GeoError, Result};

/// A resolved coordinate reference system.
///
/// Holds the PROJ.4 definition (and EPSG code, when the reference came from
/// the EPSG registry). Construction validates the definition, so a
/// `SpatialRef` value is always usable by [`crate::spatial_ref::CoordTransform`].
///
/// Geographic references use degrees in `(longitude, latitude)` order.
#[derive(Debug, Clone)]
pub struct SpatialRef {
    epsg: Option<u32>,
    proj4: String,
}

impl PartialEq for SpatialRef {
    fn eq(&self, other: &SpatialRef) -> bool {
        match (self.epsg, other.epsg) {
            (Some(a), Some(b)) => a == b,
            _ => normalize(&self.proj4) == normalize(&other.proj4),
        }
    }
}

impl SpatialRef {
    /// Resolve an EPSG code through the bundled EPSG database.
    ///
    /// Fails with [`GeoError::InvalidCrs`] when the code is unknown or its
    /// definition is not supported by the projection engine.
    pub fn from_epsg(epsg_code: u32) -> Result<SpatialRef> {
        let proj4 = u16::try_from(epsg_code)
            .ok()
            .and_then(crs_definitions::from_code)
            .map(|def| def.proj4)
            .ok_or_else(|| GeoError::InvalidCrs {
                definition: format!("EPSG:{epsg_code}"),
                msg: "not found in the EPSG database".to_string(),
            })?;

        let spatial_ref = SpatialRef {
            epsg: Some(epsg_code),
            proj4: proj4.to_string(),
        };
        spatial_ref.to_proj()?;
        Ok(spatial_ref)
    }

    /// Build a reference from a PROJ.4 string such as `+proj=longlat +datum=WGS84 +no_defs`.
    pub fn from_proj4(proj4_string: &str) -> Result<SpatialRef> {
        let trimmed = proj4_string.trim();
        if trimmed.is_empty() {
            return Err(GeoError::InvalidCrs {
                definition: proj4_string.to_string(),
                msg: "empty definition".to_string(),
            });
        }
        let spatial_ref = SpatialRef {
            epsg: None,
            proj4: trimmed.to_string(),
        };
        spatial_ref.to_proj()?;
        Ok(spatial_ref)
    }

    /// Accepts `EPSG:<code>` (case insensitive), a bare numeric code, or a PROJ.4 string.
    pub fn from_definition(definition: &str) -> Result<SpatialRef> {
        let trimmed = definition.trim();
        let code = trimmed
            .split_once(':')
            .filter(|(authority, _)| authority.eq_ignore_ascii_case("EPSG"))
            .map(|(_, code)| code)
            .unwrap_or(trimmed);

        if let Ok(epsg_code) = code.parse::<u32>() {
            return SpatialRef::from_epsg(epsg_code);
        }
        if trimmed.starts_with('+') {
            return SpatialRef::from_proj4(trimmed);
        }
        Err(GeoError::InvalidCrs {
            definition: definition.to_string(),
            msg: "expected EPSG:<code> or a PROJ.4 string".to_string(),
        })
    }

    /// WGS 84 geographic coordinates (EPSG:4326).
    pub fn wgs84() -> Result<SpatialRef> {
        SpatialRef::from_epsg(4326)
    }

    /// EPSG code, if the reference was resolved from one.
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    pub fn to_proj4(&self) -> &str {
        &self.proj4
    }

    /// `EPSG:<code>` when known, the PROJ.4 string otherwise.
    pub fn authority(&self) -> String {
        match self.epsg {
            Some(code) => format!("EPSG:{code}"),
            None => self.proj4.clone(),
        }
    }

    /// `true` for longitude/latitude references.
    pub fn is_geographic(&self) -> bool {
        self.proj4
            .split_whitespace()
            .any(|token| token == "+proj=longlat" || token == "+proj=latlong")
    }

    pub(crate) fn to_proj(&self) -> Result<Proj> {
        Proj::from_proj_string(&self.proj4).map_err(|e| GeoError::InvalidCrs {
            definition: self.authority(),
            msg: format!("{e:?}"),
        })
    }
}

impl FromStr for SpatialRef {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        SpatialRef::from_definition(s)
    }
}

impl Display for SpatialRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority())
    }
}

fn normalize(proj4: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = proj4.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}
