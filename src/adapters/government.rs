//! Current federal government (ministers, cabinet).
//!
//! No source is wired up for this category. The lookup reports
//! [`FetchError::NotImplemented`] and the resolver's outer boundary turns
//! that into its generic retry reply.

use crate::error::{FetchError, FetchResult};
use crate::fetch::Fetcher;

// TODO: scrape the ministers list from the planalto portal once it has a stable selector.
pub fn lookup(_fetcher: &dyn Fetcher) -> FetchResult<String> {
    Err(FetchError::NotImplemented {
        provider: "current_government".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ScriptedFetcher;

    #[test]
    fn reports_not_implemented_without_fetching() {
        let fetcher = ScriptedFetcher::new();
        assert!(matches!(
            lookup(&fetcher),
            Err(FetchError::NotImplemented { .. })
        ));
        assert!(fetcher.requests().is_empty());
    }
}
