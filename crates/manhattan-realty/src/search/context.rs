use super::strategy::{SearchOutcome, SearchStrategy};
use super::SearchError;
use crate::catalog::Catalog;
use tracing::debug;

/// Holds the strategy currently in use so callers can swap algorithms
/// without touching the radius filtering.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    strategy: Option<SearchStrategy>,
}

impl SearchContext {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    pub fn set_strategy(&mut self, strategy: SearchStrategy) {
        self.strategy = Some(strategy);
    }

    pub fn strategy(&self) -> Option<&SearchStrategy> {
        self.strategy.as_ref()
    }

    pub fn search(
        &self,
        catalog: &Catalog,
        center: &[i32],
        radius: i32,
    ) -> Result<SearchOutcome, SearchError> {
        let strategy = self.strategy.as_ref().ok_or(SearchError::NoStrategy)?;
        debug!(?strategy, ?center, radius, "running property search");
        strategy.search(catalog, center, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::property::Property;
    use crate::search::PriceComparison;

    fn catalog() -> Catalog {
        Catalog::from_properties([
            Property::new(vec![4, 5], 80.0, 10_000.0, true).expect("valid"),
            Property::new(vec![4, 7], 20.0, 10_000.0, false).expect("valid"),
        ])
        .expect("unique addresses")
    }

    #[test]
    fn empty_context_is_illegal_state() {
        let context = SearchContext::default();
        let err = context.search(&catalog(), &[4, 5], 2).expect_err("no strategy");
        assert_eq!(err.kind(), FailureKind::IllegalState);
    }

    #[test]
    fn swapping_strategy_changes_result_shape() {
        let catalog = catalog();
        let mut context = SearchContext::new(SearchStrategy::by_status(true));
        let sold = context.search(&catalog, &[4, 5], 2).expect("valid");
        assert_eq!(sold.matches().map(<[Property]>::len), Some(1));

        context.set_strategy(SearchStrategy::average_price());
        let average = context.search(&catalog, &[4, 5], 2).expect("valid");
        assert_eq!(average.average(), Some(500_000.0));

        context.set_strategy(
            SearchStrategy::by_price(500_000.0, PriceComparison::Lower).expect("valid"),
        );
        let cheaper = context.search(&catalog, &[4, 5], 2).expect("valid");
        assert_eq!(
            cheaper.matches().expect("list outcome")[0].address().coordinates(),
            &[4, 7]
        );
    }
}
