//! Loading/error/data state handed to renderers.

use lodge_error::LodgeResult;
use serde::{Deserialize, Serialize};

/// State of one query as a renderer sees it.
///
/// Exactly one of `data` and `error` is set once the query settles.
///
/// # Examples
///
/// ```
/// use lodge_content::QueryState;
///
/// let state = QueryState::success(vec![1, 2, 3]);
/// assert!(!state.is_loading);
/// assert_eq!(state.data.as_deref(), Some(&[1, 2, 3][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState<T> {
    /// Query result, once available
    pub data: Option<T>,
    /// Whether the query is still in flight
    pub is_loading: bool,
    /// Error message when the query failed
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    /// A query that has not settled yet.
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }

    /// A settled, successful query.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            is_loading: false,
            error: None,
        }
    }

    /// A settled, failed query.
    pub fn failure(error: impl ToString) -> Self {
        Self {
            data: None,
            is_loading: false,
            error: Some(error.to_string()),
        }
    }

    /// Settle from a query result.
    pub fn from_result(result: LodgeResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e),
        }
    }

    /// Whether the query settled with an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Transform the data, keeping loading and error state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            data: self.data.map(f),
            is_loading: self.is_loading,
            error: self.error,
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> From<LodgeResult<T>> for QueryState<T> {
    fn from(result: LodgeResult<T>) -> Self {
        Self::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodge_error::StoreError;

    #[test]
    fn failure_carries_message_without_data() {
        let state: QueryState<Vec<u8>> = Err(StoreError::new("connection refused").into()).into();
        assert!(state.is_error());
        assert!(!state.is_loading);
        assert!(state.data.is_none());
        assert!(state.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let json = serde_json::to_value(QueryState::success(1)).unwrap();
        assert_eq!(json, serde_json::json!({"data": 1, "is_loading": false, "error": null}));
    }
}
