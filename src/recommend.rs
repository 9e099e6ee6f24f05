// Lens recommendations
// Narrow the catalog by camera format, then aesthetic, then focal need,
// falling back to the previous stage whenever a stage empties the list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Lens, LensType};
use crate::constants::{
    CLEAN_MODERN_MAKERS, MAX_RECOMMENDATIONS, PORTRAIT_MAX_MM, STANDARD_MAX_MM, VINTAGE_MAKER, WIDE_MAX_MM,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFormat {
    #[serde(rename = "16mm")]
    Sixteen,
    #[serde(rename = "S35")]
    Super35,
    #[serde(rename = "FF")]
    FullFrame,
    #[serde(rename = "65mm")]
    SixtyFive,
}

impl CameraFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraFormat::Sixteen => "16mm",
            CameraFormat::Super35 => "S35",
            CameraFormat::FullFrame => "FF",
            CameraFormat::SixtyFive => "65mm",
        }
    }

    fn accepts(&self, category: &str) -> bool {
        match self {
            CameraFormat::Sixteen => category.contains("16mm"),
            CameraFormat::Super35 => category.contains("35mm") && !category.contains("full frame"),
            CameraFormat::FullFrame => category.contains("full frame"),
            CameraFormat::SixtyFive => category.contains("65mm"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aesthetic {
    Anamorphic,
    Vintage,
    CleanModern,
    Neutral,
}

impl Aesthetic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aesthetic::Anamorphic => "anamorphic",
            Aesthetic::Vintage => "vintage",
            Aesthetic::CleanModern => "clean-modern",
            Aesthetic::Neutral => "neutral",
        }
    }

    fn accepts(&self, lens: &Lens) -> bool {
        let category = lens.category.to_lowercase();
        match self {
            Aesthetic::Anamorphic => category.contains("anamorphic"),
            Aesthetic::Vintage => {
                category.contains("vintage")
                    || lens.name.to_lowercase().contains("vintage")
                    || lens.manufacturer == VINTAGE_MAKER
                    || lens
                        .notes
                        .as_deref()
                        .map_or(false, |n| n.to_lowercase().contains("vintage"))
            }
            Aesthetic::CleanModern => {
                category.contains("modern") || CLEAN_MODERN_MAKERS.contains(&lens.manufacturer.as_str())
            }
            Aesthetic::Neutral => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocalNeed {
    Wide,
    Standard,
    Portrait,
    Telephoto,
    Zoom,
    Any,
}

impl FocalNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            FocalNeed::Wide => "wide",
            FocalNeed::Standard => "standard",
            FocalNeed::Portrait => "portrait",
            FocalNeed::Telephoto => "telephoto",
            FocalNeed::Zoom => "zoom",
            FocalNeed::Any => "any",
        }
    }

    fn accepts(&self, lens: &Lens) -> bool {
        match self {
            FocalNeed::Zoom => lens.lens_type == LensType::Zoom,
            FocalNeed::Any => true,
            need => match lens.focal_value() {
                Some(mm) => match need {
                    FocalNeed::Wide => mm < WIDE_MAX_MM,
                    FocalNeed::Standard => (WIDE_MAX_MM..=STANDARD_MAX_MM).contains(&mm),
                    FocalNeed::Portrait => mm > STANDARD_MAX_MM && mm <= PORTRAIT_MAX_MM,
                    FocalNeed::Telephoto => mm > PORTRAIT_MAX_MM,
                    FocalNeed::Zoom | FocalNeed::Any => true,
                },
                None => false,
            },
        }
    }
}

impl FromStr for CameraFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "16mm" => Ok(CameraFormat::Sixteen),
            "S35" => Ok(CameraFormat::Super35),
            "FF" => Ok(CameraFormat::FullFrame),
            "65mm" => Ok(CameraFormat::SixtyFive),
            other => Err(format!("unknown format '{}' (expected 16mm, S35, FF or 65mm)", other)),
        }
    }
}

impl FromStr for Aesthetic {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "anamorphic" => Ok(Aesthetic::Anamorphic),
            "vintage" => Ok(Aesthetic::Vintage),
            "clean-modern" => Ok(Aesthetic::CleanModern),
            "neutral" => Ok(Aesthetic::Neutral),
            other => Err(format!(
                "unknown aesthetic '{}' (expected anamorphic, vintage, clean-modern or neutral)",
                other
            )),
        }
    }
}

impl FromStr for FocalNeed {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "wide" => Ok(FocalNeed::Wide),
            "standard" => Ok(FocalNeed::Standard),
            "portrait" => Ok(FocalNeed::Portrait),
            "telephoto" => Ok(FocalNeed::Telephoto),
            "zoom" => Ok(FocalNeed::Zoom),
            "any" => Ok(FocalNeed::Any),
            other => Err(format!("unknown focal need '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub format: CameraFormat,
    pub aesthetic: Aesthetic,
    pub focal_need: FocalNeed,
}

/// Recommended lenses plus a trace of how many survived each stage
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    pub lenses: Vec<&'a Lens>,
    pub steps: Vec<String>,
}

pub fn recommend<'a>(lenses: &'a [Lens], request: &RecommendationRequest) -> Recommendation<'a> {
    let mut steps = Vec::new();

    let format_filtered: Vec<&Lens> = lenses
        .iter()
        .filter(|l| request.format.accepts(&l.category.to_lowercase()))
        .collect();
    steps.push(format!(
        "After format filter ({}): {} lenses",
        request.format.as_str(),
        format_filtered.len()
    ));

    let mut aesthetic_filtered: Vec<&Lens> = format_filtered
        .iter()
        .copied()
        .filter(|l| request.aesthetic.accepts(l))
        .collect();
    if aesthetic_filtered.is_empty() {
        log::debug!("No lenses after aesthetic filter, using format filtered");
        aesthetic_filtered = format_filtered.clone();
    }
    steps.push(format!(
        "After aesthetic filter ({}): {} lenses",
        request.aesthetic.as_str(),
        aesthetic_filtered.len()
    ));

    let mut picks: Vec<&Lens> = aesthetic_filtered
        .iter()
        .copied()
        .filter(|l| request.focal_need.accepts(l))
        .collect();
    steps.push(format!(
        "After focal length filter ({}): {} lenses",
        request.focal_need.as_str(),
        picks.len()
    ));

    if picks.is_empty() {
        log::debug!("No lenses match all criteria, falling back to aesthetic filtered");
        picks = aesthetic_filtered.iter().copied().take(MAX_RECOMMENDATIONS).collect();
    }
    if picks.is_empty() {
        picks = format_filtered.iter().copied().take(MAX_RECOMMENDATIONS).collect();
    }
    picks.truncate(MAX_RECOMMENDATIONS);

    Recommendation { lenses: picks, steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens(manufacturer: &str, name: &str, focal: &str, category: &str) -> Lens {
        Lens {
            manufacturer: manufacturer.to_string(),
            name: name.to_string(),
            focal_length: focal.to_string(),
            category: category.to_string(),
            lens_type: if focal.contains('-') { LensType::Zoom } else { LensType::Prime },
            ..Default::default()
        }
    }

    fn catalog() -> Vec<Lens> {
        vec![
            lens("Cooke", "Panchro/i Classic", "25mm", "35mm primes"),
            lens("Zeiss", "Master Prime", "50mm", "35mm primes"),
            lens("Canon", "K35", "85mm", "35mm primes"),
            lens("Angenieux", "Optimo", "24-290mm", "35mm zooms"),
            lens("Zeiss", "Supreme", "135mm", "full frame primes"),
            lens("Hawk", "V-Lite", "40mm", "anamorphic"),
            lens("Kowa", "Cine Prominar", "16mm", "16mm primes"),
        ]
    }

    fn names<'a>(rec: &Recommendation<'a>) -> Vec<&'a str> {
        rec.lenses.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_s35_excludes_full_frame_and_filters_focal() {
        let all = catalog();
        let request = RecommendationRequest {
            format: CameraFormat::Super35,
            aesthetic: Aesthetic::Neutral,
            focal_need: FocalNeed::Portrait,
        };
        let rec = recommend(&all, &request);
        assert_eq!(names(&rec), vec!["K35"]);
        assert_eq!(rec.steps[0], "After format filter (S35): 4 lenses");
        assert_eq!(rec.steps.len(), 3);
    }

    #[test]
    fn test_clean_modern_makers() {
        let all = catalog();
        let request = RecommendationRequest {
            format: CameraFormat::Super35,
            aesthetic: Aesthetic::CleanModern,
            focal_need: FocalNeed::Standard,
        };
        assert_eq!(names(&recommend(&all, &request)), vec!["Master Prime"]);
    }

    #[test]
    fn test_vintage_matches_cooke() {
        let all = catalog();
        let request = RecommendationRequest {
            format: CameraFormat::Super35,
            aesthetic: Aesthetic::Vintage,
            focal_need: FocalNeed::Wide,
        };
        assert_eq!(names(&recommend(&all, &request)), vec!["Panchro/i Classic"]);
    }

    #[test]
    fn test_zoom_uses_lens_type() {
        let all = catalog();
        let request = RecommendationRequest {
            format: CameraFormat::Super35,
            aesthetic: Aesthetic::Neutral,
            focal_need: FocalNeed::Zoom,
        };
        assert_eq!(names(&recommend(&all, &request)), vec!["Optimo"]);
    }

    #[test]
    fn test_empty_aesthetic_falls_back_to_format() {
        let all = catalog();
        let request = RecommendationRequest {
            format: CameraFormat::Sixteen,
            aesthetic: Aesthetic::Anamorphic,
            focal_need: FocalNeed::Any,
        };
        let rec = recommend(&all, &request);
        assert_eq!(names(&rec), vec!["Cine Prominar"]);
        assert_eq!(rec.steps[1], "After aesthetic filter (anamorphic): 1 lenses");
    }

    #[test]
    fn test_empty_focal_falls_back_to_aesthetic() {
        let all = catalog();
        let request = RecommendationRequest {
            format: CameraFormat::FullFrame,
            aesthetic: Aesthetic::Neutral,
            focal_need: FocalNeed::Wide,
        };
        let rec = recommend(&all, &request);
        assert_eq!(names(&rec), vec!["Supreme"]);
        assert_eq!(rec.steps[2], "After focal length filter (wide): 0 lenses");
    }

    #[test]
    fn test_results_capped() {
        let all: Vec<Lens> = (0..40)
            .map(|i| lens("Zeiss", &format!("Prime {}", i), "50mm", "35mm primes"))
            .collect();
        let request = RecommendationRequest {
            format: CameraFormat::Super35,
            aesthetic: Aesthetic::Neutral,
            focal_need: FocalNeed::Standard,
        };
        assert_eq!(recommend(&all, &request).lenses.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_request_values_parse_from_cli_strings() {
        assert_eq!("S35".parse::<CameraFormat>(), Ok(CameraFormat::Super35));
        assert_eq!("clean-modern".parse::<Aesthetic>(), Ok(Aesthetic::CleanModern));
        assert_eq!("telephoto".parse::<FocalNeed>(), Ok(FocalNeed::Telephoto));
        assert!("s35".parse::<CameraFormat>().is_err());
    }

    #[test]
    fn test_no_format_match_is_empty() {
        let all = catalog();
        let request = RecommendationRequest {
            format: CameraFormat::SixtyFive,
            aesthetic: Aesthetic::Neutral,
            focal_need: FocalNeed::Any,
        };
        assert!(recommend(&all, &request).lenses.is_empty());
    }
}
