//! Search page
//!
//! Finds counterparties living in a target city who are looking for someone
//! in the caller's city. Display rates are fetched after a successful search
//! on a best-effort basis: if that call fails the results are shown without
//! rates.

use crate::app::Shell;
use crate::gateway::Backend;
use crate::model::{target_cities, CurrencyRateTable, FormError, MatchedApplication, RATES_BASE, WORLD_CITIES};
use crate::session::{Session, SessionStorage};

use super::request::{Applied, Blocked, PageError, Pending, RequestState, RequestTracker, Settled};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub target_city: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub applications: Vec<MatchedApplication>,
    /// Absent when the rates call failed
    pub rates: Option<CurrencyRateTable>,
}

/// What the results area shows
#[derive(Debug, PartialEq)]
pub enum SearchView<'a> {
    Idle,
    Searching,
    Found(&'a SearchResults),
    /// The search succeeded with no matches
    Empty,
    Failed(&'a PageError),
}

#[derive(Debug, Default)]
pub struct SearchController {
    pub target_city: String,
    request: RequestTracker<SearchResults>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cities the caller may search in: every catalogue city except their own
    pub fn target_options(session: &Session) -> Vec<&'static str> {
        target_cities(WORLD_CITIES, &session.user().city)
    }

    pub fn view(&self) -> SearchView<'_> {
        match self.request.state() {
            RequestState::Idle => SearchView::Idle,
            RequestState::InFlight => SearchView::Searching,
            RequestState::Succeeded(results) if results.applications.is_empty() => SearchView::Empty,
            RequestState::Succeeded(results) => SearchView::Found(results),
            RequestState::Failed(e) => SearchView::Failed(e),
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.request.is_in_flight() {
            "Searching..."
        } else {
            "Search"
        }
    }

    pub fn begin(&mut self, session: Option<&Session>) -> Result<Pending<SearchQuery>, Blocked> {
        let session = session.ok_or(Blocked::SignedOut)?;
        self.request.check_ready()?;

        let target_city = self.target_city.trim();
        if target_city.is_empty() {
            return Err(self.request.reject(FormError::Missing("Target city")));
        }
        if target_city == session.user().city {
            return Err(self.request.reject(FormError::SameCity));
        }

        let query = SearchQuery {
            target_city: target_city.to_string(),
            token: session.token().to_string(),
        };
        let ticket = self.request.begin()?;
        Ok(Pending {
            ticket,
            request: query,
        })
    }

    pub async fn send<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<SearchQuery>,
    ) -> Settled<SearchResults> {
        let query = &pending.request;
        let applications = match backend
            .search_applications(&query.target_city, &query.token)
            .await
        {
            Ok(applications) => applications,
            Err(e) => return pending.settle(Err(e)),
        };

        let rates = match backend.currency_rates(RATES_BASE).await {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::warn!(error = %e, "Currency rates unavailable, showing results without them");
                None
            }
        };

        tracing::debug!(
            target_city = %query.target_city,
            matches = applications.len(),
            "Search completed"
        );
        pending.settle(Ok(SearchResults {
            applications,
            rates,
        }))
    }

    pub fn finish(&mut self, settled: Settled<SearchResults>) -> Applied {
        self.request.apply(settled)
    }

    /// Leaving the page: late results are dropped
    pub fn teardown(&mut self) {
        self.request.teardown();
    }

    pub async fn submit<B: Backend + ?Sized, S: SessionStorage>(
        &mut self,
        backend: &B,
        shell: &mut Shell<S>,
    ) -> Result<Applied, Blocked> {
        let pending = self.begin(shell.current_session())?;
        let settled = Self::send(backend, &pending).await;
        let applied = self.finish(settled);
        shell.observe(applied);
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{ApiError, AuthSession};
    use crate::model::Currency;
    use crate::navigation::Page;
    use crate::session::MemoryStorage;
    use crate::test_support::{auth_error, sample_match, sample_session, FakeBackend};
    use std::collections::HashMap;

    fn signed_in() -> Shell<MemoryStorage> {
        let mut shell = Shell::new(MemoryStorage::new());
        let session = sample_session();
        shell
            .sign_in(AuthSession {
                user: session.user().clone(),
                token: session.token().to_string(),
            })
            .unwrap();
        shell
    }

    fn rates() -> CurrencyRateTable {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), 0.92);
        rates.insert("JPY".to_string(), 149.5);
        CurrencyRateTable::new(Currency::Usd, rates)
    }

    fn searching(city: &str) -> SearchController {
        let mut controller = SearchController::new();
        controller.target_city = city.to_string();
        controller
    }

    #[tokio::test]
    async fn test_results_with_rates() {
        let backend = FakeBackend::new();
        backend.search.borrow_mut().push_back(Ok(vec![sample_match("u-2", "Paris")]));
        backend.rates.borrow_mut().push_back(Ok(rates()));
        let mut shell = signed_in();
        let mut controller = searching("Paris");

        let applied = controller.submit(&backend, &mut shell).await.unwrap();
        assert_eq!(applied, Applied::Succeeded);
        match controller.view() {
            SearchView::Found(results) => {
                assert_eq!(results.applications.len(), 1);
                assert_eq!(results.rates.as_ref().and_then(|r| r.rate(Currency::Eur)), Some(0.92));
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_result_differs_from_transport_failure() {
        let backend = FakeBackend::new();
        backend.search.borrow_mut().push_back(Ok(Vec::new()));
        backend.rates.borrow_mut().push_back(Ok(rates()));
        backend.search.borrow_mut().push_back(Err(ApiError::transport()));
        let mut shell = signed_in();
        let mut controller = searching("Paris");

        controller.submit(&backend, &mut shell).await.unwrap();
        assert_eq!(controller.view(), SearchView::Empty);

        controller.submit(&backend, &mut shell).await.unwrap();
        match controller.view() {
            SearchView::Failed(PageError::Api(ApiError::Transport(_))) => {}
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rates_failure_keeps_results() {
        let backend = FakeBackend::new();
        backend.search.borrow_mut().push_back(Ok(vec![sample_match("u-2", "Paris")]));
        backend.rates.borrow_mut().push_back(Err(ApiError::transport()));
        let mut shell = signed_in();
        let mut controller = searching("Paris");

        assert_eq!(controller.submit(&backend, &mut shell).await.unwrap(), Applied::Succeeded);
        match controller.view() {
            SearchView::Found(results) => assert!(results.rates.is_none()),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_own_city_and_blank_city_rejected_locally() {
        let backend = FakeBackend::new();
        let mut shell = signed_in();

        let mut controller = searching("London");
        assert_eq!(
            controller.submit(&backend, &mut shell).await,
            Err(Blocked::Invalid(FormError::SameCity))
        );

        let mut controller = searching("  ");
        assert!(controller.submit(&backend, &mut shell).await.is_err());
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_token_signs_out() {
        let backend = FakeBackend::new();
        backend.search.borrow_mut().push_back(Err(auth_error()));
        let mut shell = signed_in();
        let mut controller = searching("Paris");

        let applied = controller.submit(&backend, &mut shell).await.unwrap();
        assert_eq!(applied, Applied::SessionExpired);
        assert!(shell.current_session().is_none());
        assert_eq!(shell.page(), &Page::Home);
        assert_eq!(backend.call_count("rates"), 0);
    }

    #[tokio::test]
    async fn test_results_after_teardown_are_dropped() {
        let backend = FakeBackend::new();
        backend.search.borrow_mut().push_back(Ok(vec![sample_match("u-2", "Paris")]));
        backend.rates.borrow_mut().push_back(Ok(rates()));
        let session = sample_session();
        let mut controller = searching("Paris");

        let pending = controller.begin(Some(&session)).unwrap();
        controller.teardown();
        let settled = SearchController::send(&backend, &pending).await;
        assert_eq!(controller.finish(settled), Applied::Discarded);
        assert_eq!(controller.view(), SearchView::Idle);
    }

    #[test]
    fn test_target_options_exclude_home_city() {
        let options = SearchController::target_options(&sample_session());
        assert!(!options.contains(&"London"));
        assert!(options.contains(&"Paris"));
    }

    #[test]
    fn test_signed_out_search_refused() {
        let mut controller = searching("Paris");
        assert_eq!(controller.begin(None), Err(Blocked::SignedOut));
    }
}
