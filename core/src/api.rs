use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, USER_AGENT,
};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://hackerone.com/graphql";

const OPERATION_NAME: &str = "HacktivitySearchQuery";
const PRODUCT_AREA: &str = "hacktivity";
const PRODUCT_FEATURE: &str = "overview";

const SEARCH_QUERY: &str = "query HacktivitySearchQuery($queryString: String!, $from: Int, $size: Int, $sort: SortInput!) {
  me { id __typename }
  search(
    index: CompleteHacktivityReportIndex
    query_string: $queryString
    from: $from
    size: $size
    sort: $sort
  ) {
    __typename
    total_count
    nodes {
      __typename
      ... on HacktivityDocument {
        id
        _id
        severity_rating
        report {
          id
          _id
          title
          url
          disclosed_at
        }
      }
    }
  }
}";

/// Connection settings for the hacktivity search endpoint.
///
/// Shared by every page request of a run and never mutated after construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: Url,
    pub headers: Vec<(String, String)>,
    /// Raw `Cookie` header value. The public index needs none.
    pub session_cookie: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            headers: vec![
                (
                    USER_AGENT.to_string(),
                    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0"
                        .to_string(),
                ),
                (ACCEPT.to_string(), "*/*".to_string()),
                (ACCEPT_LANGUAGE.to_string(), "en-US,en;q=0.5".to_string()),
                (CONTENT_TYPE.to_string(), "application/json".to_string()),
                ("X-Product-Area".to_string(), PRODUCT_AREA.to_string()),
                ("X-Product-Feature".to_string(), PRODUCT_FEATURE.to_string()),
            ],
            session_cookie: None,
        }
    }
}

impl ApiConfig {
    /// Same headers, different endpoint.
    pub fn with_endpoint(endpoint: &str) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| anyhow::anyhow!("invalid endpoint '{}': {}", endpoint, e))?;
        Ok(Self {
            endpoint,
            ..Self::default()
        })
    }

    /// Builds the header map sent with every request. Entries that are not
    /// valid header names or values are skipped.
    pub fn header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (key, val) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(val),
            ) {
                headers.insert(name, value);
            }
        }
        if let Some(ref cookie) = self.session_cookie {
            if let Ok(value) = HeaderValue::from_str(cookie) {
                headers.insert(COOKIE, value);
            }
        }
        headers
    }
}

/// Lucene-style filter: the weakness category, resolved, publicly disclosed.
pub fn query_string(category: &str) -> String {
    format!(
        "cwe:(\"{}\") AND substate:(\"Resolved\") AND disclosed:true",
        category
    )
}

/// JSON body for one page of search results.
pub fn search_payload(category: &str, from: usize, size: usize) -> Value {
    json!({
        "operationName": OPERATION_NAME,
        "variables": {
            "queryString": query_string(category),
            "size": size,
            "from": from,
            "sort": {
                "field": "latest_disclosable_activity_at",
                "direction": "DESC"
            },
            "product_area": PRODUCT_AREA,
            "product_feature": PRODUCT_FEATURE
        },
        "query": SEARCH_QUERY
    })
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<SearchData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchPage,
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total_count: Option<u64>,
    pub nodes: Vec<HacktivityNode>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HacktivityNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub severity_rating: Option<String>,
    pub report: DisclosedReport,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DisclosedReport {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub disclosed_at: Option<String>,
}

impl GraphQlResponse {
    /// Unwraps the search page, turning a data-less error response into an error.
    pub fn into_page(self) -> anyhow::Result<SearchPage> {
        match self.data {
            Some(data) => Ok(data.search),
            None if !self.errors.is_empty() => {
                let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
                Err(anyhow::anyhow!("GraphQL error: {}", messages.join("; ")))
            }
            None => Err(anyhow::anyhow!("GraphQL response carried no data")),
        }
    }
}
