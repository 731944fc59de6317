//! Suites of cases.
//!
//! A suite is an ordered list of case plans. A plan either holds a fixed
//! [`Case`] or defers construction until the case is about to run, so that
//! generated fixtures and values captured by earlier cases are available to
//! both the request and its expectations.

use std::fmt;

use probe_domain::{Bindings, Case};

use crate::error::BuildError;
use crate::ports::DataFactory;

/// Deferred constructor for a case.
pub type PlanFn =
    dyn Fn(&Bindings, &mut dyn DataFactory) -> Result<Case, BuildError> + Send + Sync;

/// A single entry of a suite.
pub enum CasePlan {
    /// A case known up front.
    Fixed(Case),
    /// A case built at run time.
    Deferred {
        /// Name reported if the plan fails.
        name: String,
        /// The constructor.
        build: Box<PlanFn>,
    },
}

impl CasePlan {
    /// Name of the case this plan produces.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Fixed(case) => &case.name,
            Self::Deferred { name, .. } => name,
        }
    }

    /// Produces the case for the current bindings.
    ///
    /// # Errors
    /// Returns whatever error the deferred constructor reports.
    pub fn resolve(
        &self,
        bindings: &Bindings,
        factory: &mut dyn DataFactory,
    ) -> Result<Case, BuildError> {
        match self {
            Self::Fixed(case) => Ok(case.clone()),
            Self::Deferred { build, .. } => build(bindings, factory),
        }
    }
}

impl fmt::Debug for CasePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(case) => f.debug_tuple("Fixed").field(case).finish(),
            Self::Deferred { name, .. } => f
                .debug_struct("Deferred")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

/// A named, ordered collection of case plans.
#[derive(Debug)]
pub struct Suite {
    name: String,
    plans: Vec<CasePlan>,
}

impl Suite {
    /// Creates an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plans: Vec::new(),
        }
    }

    /// Appends a fixed case.
    #[must_use]
    pub fn case(mut self, case: Case) -> Self {
        self.plans.push(CasePlan::Fixed(case));
        self
    }

    /// Appends a case built at run time.
    #[must_use]
    pub fn plan<F>(mut self, name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&Bindings, &mut dyn DataFactory) -> Result<Case, BuildError> + Send + Sync + 'static,
    {
        self.plans.push(CasePlan::Deferred {
            name: name.into(),
            build: Box::new(build),
        });
        self
    }

    /// Suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plans in declaration order.
    #[must_use]
    pub fn plans(&self) -> &[CasePlan] {
        &self.plans
    }

    /// Number of declared cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Returns true if no cases are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedFactory;
    use super::*;
    use probe_domain::request::RequestTemplate;
    use serde_json::json;

    #[test]
    fn test_fixed_and_deferred_plans_keep_order() {
        let suite = Suite::new("Products")
            .case(Case::new("List products", RequestTemplate::get("/products")))
            .plan("Get product", |bindings, _factory| {
                let id = bindings
                    .get("product_id")
                    .ok_or_else(|| BuildError::Plan("product_id not bound".to_string()))?;
                Ok(Case::new("Get product", RequestTemplate::get(format!("/products/{id}"))))
            });

        let names: Vec<_> = suite.plans().iter().map(CasePlan::name).collect();
        assert_eq!(names, vec!["List products", "Get product"]);
        assert_eq!(suite.len(), 2);
        assert_eq!(suite.name(), "Products");
    }

    #[test]
    fn test_deferred_plan_sees_bindings_and_factory() {
        let suite = Suite::new("Products").plan("Add product", |bindings, factory| {
            let title = factory.product_name();
            let owner = bindings.get("user_id").cloned().unwrap_or(json!(null));
            Ok(Case::new(
                "Add product",
                RequestTemplate::post("/products/add")
                    .body(json!({"title": title, "owner": owner})),
            ))
        });

        let bindings = Bindings::new().with("user_id", json!(3));
        let case = suite.plans()[0]
            .resolve(&bindings, &mut FixedFactory)
            .expect("plan resolves");
        assert_eq!(
            case.request.body,
            Some(json!({"title": "Ergonomic Steel Chair", "owner": 3}))
        );
    }

    #[test]
    fn test_deferred_plan_error() {
        let suite = Suite::new("Products").plan("Get product", |_, _| {
            Err(BuildError::Plan("nothing to fetch".to_string()))
        });
        let result = suite.plans()[0].resolve(&Bindings::new(), &mut FixedFactory);
        assert!(matches!(result, Err(BuildError::Plan(_))));
    }
}
