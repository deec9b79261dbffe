use serde::Serialize;
use std::fmt;
use tracing::info;

use super::store::{ClaimRecords, RecordStore, StoreError};

/// Pages of the claim workflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    SubmitClaim,
    Assessment,
    Results,
    Dashboard,
    NotFound(String),
}

impl Route {
    pub fn parse(raw: &str) -> Self {
        let path = raw.split(['?', '#']).next().unwrap_or_default().trim();
        let normalized = path.trim_end_matches('/');

        match normalized {
            "" => Self::Home,
            "/submit-claim" => Self::SubmitClaim,
            "/assessment" => Self::Assessment,
            "/results" => Self::Results,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::SubmitClaim => "/submit-claim",
            Self::Assessment => "/assessment",
            Self::Results => "/results",
            Self::Dashboard => "/dashboard",
            Self::NotFound(path) => path,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "ClaimSight AI Prediction",
            Self::SubmitClaim => "Submit a New Claim",
            Self::Assessment => "Claim Assessment",
            Self::Results => "Assessment Results",
            Self::Dashboard => "Claims Dashboard",
            Self::NotFound(_) => "Page Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where a navigation request ends up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Render { route: Route },
    Redirect { from: Route, to: Route },
}

impl Resolution {
    pub fn destination(&self) -> &Route {
        match self {
            Resolution::Render { route } => route,
            Resolution::Redirect { to, .. } => to,
        }
    }
}

/// Applies the data guards: the assessment needs a current claim and the
/// results page additionally needs its score. Intake is the only recovery.
pub struct Navigator<S> {
    records: ClaimRecords<S>,
}

impl<S: RecordStore> Navigator<S> {
    pub fn new(records: ClaimRecords<S>) -> Self {
        Self { records }
    }

    pub fn resolve(&self, route: Route) -> Result<Resolution, StoreError> {
        let satisfied = match route {
            Route::Assessment => self.records.has_current_claim()?,
            Route::Results => {
                self.records.has_current_claim()? && self.records.has_prediction_score()?
            }
            _ => true,
        };

        if satisfied {
            return Ok(Resolution::Render { route });
        }

        info!(from = %route, to = %Route::SubmitClaim, "missing claim data, redirecting");
        Ok(Resolution::Redirect {
            from: route,
            to: Route::SubmitClaim,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::claims::store::{InMemoryStore, CURRENT_CLAIM_KEY, PREDICTION_SCORE_KEY};
    use std::sync::Arc;

    #[test]
    fn parses_known_paths_and_wildcard() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/submit-claim"), Route::SubmitClaim);
        assert_eq!(Route::parse("/results/"), Route::Results);
        assert_eq!(Route::parse("/dashboard?tab=claims"), Route::Dashboard);
        assert_eq!(
            Route::parse("/claims/42"),
            Route::NotFound("/claims/42".to_string())
        );
    }

    #[test]
    fn results_require_claim_and_score() {
        let store = Arc::new(InMemoryStore::new());
        let navigator = Navigator::new(ClaimRecords::new(Arc::clone(&store)));

        let resolution = navigator.resolve(Route::Results).expect("resolves");
        assert_eq!(resolution.destination(), &Route::SubmitClaim);

        store
            .set(CURRENT_CLAIM_KEY, "{}".to_string())
            .expect("set claim");
        let resolution = navigator.resolve(Route::Results).expect("resolves");
        assert_eq!(resolution.destination(), &Route::SubmitClaim);

        store
            .set(PREDICTION_SCORE_KEY, "55".to_string())
            .expect("set score");
        let resolution = navigator.resolve(Route::Results).expect("resolves");
        assert_eq!(
            resolution,
            Resolution::Render {
                route: Route::Results
            }
        );
    }

    #[test]
    fn unguarded_routes_always_render() {
        let navigator = Navigator::new(ClaimRecords::new(Arc::new(InMemoryStore::new())));
        for route in [Route::Home, Route::SubmitClaim, Route::Dashboard] {
            let resolution = navigator.resolve(route.clone()).expect("resolves");
            assert_eq!(resolution, Resolution::Render { route });
        }
    }
}
