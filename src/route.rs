use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const MIN_COMPARISON: usize = 2;
pub const MAX_COMPARISON: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown route: {path}")]
    Unknown { path: String },
    #[error("You can compare up to {max} analyses at a time")]
    SelectionFull { max: usize },
    #[error("Please select at least {min} analyses to compare")]
    TooFewSelected { min: usize, count: usize },
}

pub type RouteResult<T> = std::result::Result<T, RouteError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Upload,
    Analyze,
    History,
    Compare { ids: Vec<String> },
}

impl Route {
    pub fn compare<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            Self::History
        } else {
            Self::Compare { ids }
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (path, query) = input.split_once('?').unwrap_or((input, ""));
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Ok(Self::Upload),
            "/analyze" => Ok(Self::Analyze),
            "/history" => Ok(Self::History),
            "/compare" => {
                let ids = query
                    .split('&')
                    .filter_map(|pair| pair.strip_prefix("ids="))
                    .flat_map(|value| value.split(','))
                    .map(str::trim)
                    .filter(|id| !id.is_empty());
                Ok(Self::compare(ids))
            }
            _ => Err(RouteError::Unknown {
                path: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => f.write_str("/"),
            Self::Analyze => f.write_str("/analyze"),
            Self::History => f.write_str("/history"),
            Self::Compare { ids } if ids.is_empty() => f.write_str("/history"),
            Self::Compare { ids } => write!(f, "/compare?ids={}", ids.join(",")),
        }
    }
}

/// Analyses picked on the history page for side-by-side comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or deselect it when already selected. Returns whether
    /// it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> RouteResult<bool> {
        if let Some(index) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(index);
            return Ok(false);
        }
        if self.ids.len() >= MAX_COMPARISON {
            return Err(RouteError::SelectionFull {
                max: MAX_COMPARISON,
            });
        }
        self.ids.push(id.to_string());
        Ok(true)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn can_compare(&self) -> bool {
        self.ids.len() >= MIN_COMPARISON
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn route(&self) -> RouteResult<Route> {
        if !self.can_compare() {
            return Err(RouteError::TooFewSelected {
                min: MIN_COMPARISON,
                count: self.ids.len(),
            });
        }
        Ok(Route::compare(self.ids.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_page() {
        assert_eq!("/".parse(), Ok(Route::Upload));
        assert_eq!("".parse(), Ok(Route::Upload));
        assert_eq!("/analyze".parse(), Ok(Route::Analyze));
        assert_eq!("/history/".parse(), Ok(Route::History));
        assert_eq!(
            "/compare?ids=a1,b2".parse(),
            Ok(Route::Compare {
                ids: vec!["a1".to_string(), "b2".to_string()]
            })
        );
    }

    #[test]
    fn compare_without_ids_redirects_to_history() {
        assert_eq!("/compare".parse(), Ok(Route::History));
        assert_eq!("/compare?ids=".parse(), Ok(Route::History));
        assert_eq!("/compare?ids=,,".parse(), Ok(Route::History));
        assert_eq!(Route::compare(Vec::<String>::new()), Route::History);
    }

    #[test]
    fn compare_ignores_other_query_params() {
        let route: Route = "/compare?from=history&ids=x,y,z".parse().expect("valid route");
        assert_eq!(route.to_string(), "/compare?ids=x,y,z");
    }

    #[test]
    fn unknown_path_is_an_error() {
        assert_eq!(
            "/settings".parse::<Route>(),
            Err(RouteError::Unknown {
                path: "/settings".to_string()
            })
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for route in [
            Route::Upload,
            Route::Analyze,
            Route::History,
            Route::compare(["a", "b", "c"]),
        ] {
            assert_eq!(route.to_string().parse(), Ok(route));
        }
    }

    #[test]
    fn selection_toggles_and_caps_at_three() {
        let mut selection = ComparisonSelection::new();
        for id in ["a", "b", "c"] {
            assert_eq!(selection.toggle(id), Ok(true));
        }
        let err = selection.toggle("d").expect_err("selection is full");
        assert_eq!(err.to_string(), "You can compare up to 3 analyses at a time");
        assert!(!selection.contains("d"));

        assert_eq!(selection.toggle("b"), Ok(false));
        assert_eq!(selection.ids(), ["a", "c"]);
        assert_eq!(selection.toggle("d"), Ok(true));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn selection_needs_two_before_comparing() {
        let mut selection = ComparisonSelection::new();
        selection.toggle("a").expect("room to select");
        let err = selection.route().expect_err("one is not enough");
        assert_eq!(err, RouteError::TooFewSelected { min: 2, count: 1 });
        assert_eq!(err.to_string(), "Please select at least 2 analyses to compare");

        selection.toggle("b").expect("room to select");
        assert_eq!(
            selection.route().map(|route| route.to_string()),
            Ok("/compare?ids=a,b".to_string())
        );
        selection.clear();
        assert!(selection.is_empty());
    }
}
