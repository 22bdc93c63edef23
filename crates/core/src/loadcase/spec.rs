//! Strongly-typed load case metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identifier of a load case (numeric in most structural models, but kept opaque)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadCaseId(String);

impl LoadCaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for LoadCaseId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for LoadCaseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LoadCaseId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for LoadCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of coordinate axes the settlement field varies along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Along the chainage axis only
    #[serde(rename = "1D")]
    OneD,
    /// Over the (x, y) plane
    #[serde(rename = "2D")]
    TwoD,
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Dimension::OneD),
            "2d" => Ok(Dimension::TwoD),
            _ => Err(Error::InvalidDimension { value: s.to_string() }),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::OneD => f.write_str("1D"),
            Dimension::TwoD => f.write_str("2D"),
        }
    }
}

/// Interpolation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Linear,
    Cubic,
    Nearest,
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Scheme::Linear),
            "cubic" => Ok(Scheme::Cubic),
            "nearest" => Ok(Scheme::Nearest),
            _ => Err(Error::InvalidScheme { value: s.to_string() }),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Linear => f.write_str("linear"),
            Scheme::Cubic => f.write_str("cubic"),
            Scheme::Nearest => f.write_str("nearest"),
        }
    }
}

/// Metadata of a single settlement load case.
///
/// Dimension and scheme are resolved once at construction and cannot change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCaseSpec {
    id: LoadCaseId,
    title: String,
    dimension: Dimension,
    scheme: Scheme,
}

impl LoadCaseSpec {
    pub fn new(
        id: impl Into<LoadCaseId>,
        title: impl Into<String>,
        dimension: Dimension,
        scheme: Scheme,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            dimension,
            scheme,
        }
    }

    /// Build a spec from a free-form method descriptor such as `"2D cubic"`
    /// or `"1D_linear"`.
    ///
    /// The descriptor is split on whitespace, `_`, `-`, `,` and `/`; every
    /// token must match a dimension (`1D`, `2D`) or a scheme (`linear`,
    /// `cubic`, `nearest`) exactly, ignoring case.
    pub fn from_descriptor(
        id: impl Into<LoadCaseId>,
        title: impl Into<String>,
        descriptor: &str,
    ) -> Result<Self> {
        let mut dimension: Option<Dimension> = None;
        let mut scheme: Option<Scheme> = None;

        let tokens = descriptor
            .split(|c: char| c.is_whitespace() || matches!(c, '_' | '-' | ',' | '/'))
            .filter(|t| !t.is_empty());

        for token in tokens {
            if let Ok(d) = token.parse::<Dimension>() {
                if dimension.is_some_and(|prev| prev != d) {
                    return Err(Error::InvalidDimension {
                        value: descriptor.to_string(),
                    });
                }
                dimension = Some(d);
            } else if let Ok(s) = token.parse::<Scheme>() {
                if scheme.is_some_and(|prev| prev != s) {
                    return Err(Error::InvalidScheme {
                        value: descriptor.to_string(),
                    });
                }
                scheme = Some(s);
            } else if looks_like_dimension(token) {
                return Err(Error::InvalidDimension {
                    value: token.to_string(),
                });
            } else {
                return Err(Error::InvalidScheme {
                    value: token.to_string(),
                });
            }
        }

        let dimension = dimension.ok_or_else(|| Error::InvalidDimension {
            value: descriptor.to_string(),
        })?;
        let scheme = scheme.ok_or_else(|| Error::InvalidScheme {
            value: descriptor.to_string(),
        })?;

        Ok(Self::new(id, title, dimension, scheme))
    }

    pub fn id(&self) -> &LoadCaseId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }
}

/// `3D`, `12d`, ...
fn looks_like_dimension(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    match lower.strip_suffix('d') {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_exact_match() {
        assert_eq!("linear".parse::<Scheme>().unwrap(), Scheme::Linear);
        assert_eq!("CUBIC".parse::<Scheme>().unwrap(), Scheme::Cubic);
        assert_eq!(" Nearest ".parse::<Scheme>().unwrap(), Scheme::Nearest);
        assert!(matches!(
            "spline".parse::<Scheme>(),
            Err(Error::InvalidScheme { .. })
        ));
        // No substring matching
        assert!("linearish".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("1D".parse::<Dimension>().unwrap(), Dimension::OneD);
        assert_eq!("2d".parse::<Dimension>().unwrap(), Dimension::TwoD);
        assert!(matches!(
            "3D".parse::<Dimension>(),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_descriptor_variants() {
        let spec = LoadCaseSpec::from_descriptor(125u32, "Before", "2D cubic").unwrap();
        assert_eq!(spec.dimension(), Dimension::TwoD);
        assert_eq!(spec.scheme(), Scheme::Cubic);
        assert_eq!(spec.id().as_str(), "125");

        let spec = LoadCaseSpec::from_descriptor("126", "LT", "1D_Linear").unwrap();
        assert_eq!(spec.dimension(), Dimension::OneD);
        assert_eq!(spec.scheme(), Scheme::Linear);

        let spec = LoadCaseSpec::from_descriptor("127", "LT", "nearest, 2D").unwrap();
        assert_eq!(spec.scheme(), Scheme::Nearest);
    }

    #[test]
    fn test_descriptor_without_dimension() {
        let err = LoadCaseSpec::from_descriptor(1u32, "t", "cubic").unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { .. }));

        let err = LoadCaseSpec::from_descriptor(1u32, "t", "3D linear").unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { ref value } if value == "3D"));
    }

    #[test]
    fn test_descriptor_bad_scheme() {
        let err = LoadCaseSpec::from_descriptor(1u32, "t", "2D quintic").unwrap_err();
        assert!(matches!(err, Error::InvalidScheme { ref value } if value == "quintic"));

        let err = LoadCaseSpec::from_descriptor(1u32, "t", "2D").unwrap_err();
        assert!(matches!(err, Error::InvalidScheme { .. }));

        let err = LoadCaseSpec::from_descriptor(1u32, "t", "2D linear cubic").unwrap_err();
        assert!(matches!(err, Error::InvalidScheme { .. }));
    }

    #[test]
    fn test_descriptor_conflicting_dimension() {
        let err = LoadCaseSpec::from_descriptor(1u32, "t", "1D 2D linear").unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { .. }));
    }

    #[test]
    fn test_id_trimmed() {
        assert_eq!(LoadCaseId::from(" 124 "), LoadCaseId::from(124u32));
    }
}
