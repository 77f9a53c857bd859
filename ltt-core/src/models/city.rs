use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Returned when a string does not name one of the supported municipalities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown city '{0}'")]
pub struct UnknownCityError(pub String);

/// Ontario municipalities the estimator accepts.
///
/// The order matches the order the cities are offered to the user; the
/// first entry is the default selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    #[default]
    Toronto,
    Ottawa,
    Mississauga,
    Brampton,
    Hamilton,
    London,
    Markham,
    Vaughan,
    Kitchener,
    Windsor,
    #[serde(rename = "Richmond Hill")]
    RichmondHill,
    Oakville,
    Burlington,
    #[serde(rename = "St. Catharines")]
    StCatharines,
    Sudbury,
    Guelph,
    Kingston,
    Ajax,
    Whitby,
    Barrie,
}

impl City {
    pub const ALL: [City; 20] = [
        City::Toronto,
        City::Ottawa,
        City::Mississauga,
        City::Brampton,
        City::Hamilton,
        City::London,
        City::Markham,
        City::Vaughan,
        City::Kitchener,
        City::Windsor,
        City::RichmondHill,
        City::Oakville,
        City::Burlington,
        City::StCatharines,
        City::Sudbury,
        City::Guelph,
        City::Kingston,
        City::Ajax,
        City::Whitby,
        City::Barrie,
    ];

    pub fn all() -> &'static [City] {
        &Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Toronto => "Toronto",
            Self::Ottawa => "Ottawa",
            Self::Mississauga => "Mississauga",
            Self::Brampton => "Brampton",
            Self::Hamilton => "Hamilton",
            Self::London => "London",
            Self::Markham => "Markham",
            Self::Vaughan => "Vaughan",
            Self::Kitchener => "Kitchener",
            Self::Windsor => "Windsor",
            Self::RichmondHill => "Richmond Hill",
            Self::Oakville => "Oakville",
            Self::Burlington => "Burlington",
            Self::StCatharines => "St. Catharines",
            Self::Sudbury => "Sudbury",
            Self::Guelph => "Guelph",
            Self::Kingston => "Kingston",
            Self::Ajax => "Ajax",
            Self::Whitby => "Whitby",
            Self::Barrie => "Barrie",
        }
    }

    /// Looks a city up by its display name.
    ///
    /// Matching ignores case, periods, surrounding whitespace, and accepts
    /// `-` or `_` in place of spaces, so `"st-catharines"` and
    /// `"Richmond_Hill"` both resolve.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize_name(s);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|city| normalize_name(city.name()) == wanted)
    }

    /// Whether the municipality levies its own land transfer tax on top of
    /// the provincial one. Only Toronto does.
    pub fn levies_municipal_tax(&self) -> bool {
        matches!(self, Self::Toronto)
    }
}

fn normalize_name(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for City {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = UnknownCityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCityError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn all_lists_twenty_cities_with_toronto_first() {
        assert_eq!(City::all().len(), 20);
        assert_eq!(City::all()[0], City::Toronto);
        assert_eq!(City::all()[19], City::Barrie);
    }

    #[test]
    fn default_is_toronto() {
        assert_eq!(City::default(), City::Toronto);
    }

    #[test]
    fn parse_round_trips_every_display_name() {
        for city in City::all() {
            assert_eq!(City::parse(city.name()), Some(*city));
        }
    }

    #[test]
    fn parse_is_case_and_separator_insensitive() {
        assert_eq!(City::parse("  toronto "), Some(City::Toronto));
        assert_eq!(City::parse("RICHMOND HILL"), Some(City::RichmondHill));
        assert_eq!(City::parse("richmond_hill"), Some(City::RichmondHill));
        assert_eq!(City::parse("st-catharines"), Some(City::StCatharines));
        assert_eq!(City::parse("St Catharines"), Some(City::StCatharines));
    }

    #[test]
    fn parse_rejects_unknown_and_empty_names() {
        assert_eq!(City::parse("Montreal"), None);
        assert_eq!(City::parse(""), None);
        assert_eq!(City::parse("   "), None);
    }

    #[test]
    fn from_str_reports_the_offending_value() {
        let err = "Calgary".parse::<City>().unwrap_err();

        assert_eq!(err, UnknownCityError("Calgary".to_string()));
        assert_eq!(err.to_string(), "unknown city 'Calgary'");
    }

    #[test]
    fn only_toronto_levies_municipal_tax() {
        let levying: Vec<City> = City::all()
            .iter()
            .copied()
            .filter(City::levies_municipal_tax)
            .collect();

        assert_eq!(levying, vec![City::Toronto]);
    }

    #[test]
    fn display_uses_the_proper_name() {
        assert_eq!(City::StCatharines.to_string(), "St. Catharines");
    }
}
