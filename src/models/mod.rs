use serde::{Deserialize, Serialize};

/// Declares a closed label enum with an explicit fallback arm.
///
/// Labels are matched case-insensitively; anything else lands in the fallback
/// variant so lookup tables can handle it as a visible branch.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
        fallback $fallback:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            $fallback,
        }

        impl $name {
            /// Every recognized variant, in declaration order.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::$fallback => stringify!($fallback),
                }
            }

            pub fn parse(label: &str) -> Self {
                let label = label.trim();
                $(
                    if label.eq_ignore_ascii_case($label) {
                        return $name::$variant;
                    }
                )+
                $name::$fallback
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::$fallback)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                $name::parse(label)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let label = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok($name::parse(&label))
            }
        }
    };
}

pub mod crop;
pub mod region;
pub mod soil;
pub mod weather;

pub use crop::{CropCategory, CropEconomics, CropRequirement, EconomicSummary, WaterRequirement};
pub use region::RegionProfile;
pub use soil::{Drainage, ErosionRisk, NutrientLevel, NutrientProfile, SalinityLevel, SoilProfile};
pub use weather::{ClimateClass, MonthlyWeather, WeatherSummary};

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Interval overlap: `self.min <= other.max && self.max >= other.min`.
    pub fn overlaps(&self, other: &ValueRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}
