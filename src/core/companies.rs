use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use url::Url;

pub const HAYS_RESULTS: &str = "https://www.haysplc.com/investors/results-centre";
pub const PAGE_RESULTS: &str = "https://www.page.com/investors/results-and-presentations";
pub const RW_RESULTS: &str = "https://www.robertwaltersplc.com/investors/reports.html";

pub const ALLOWED_HOSTS: &[&str] = &[
    "www.haysplc.com",
    "haysplc.com",
    "www.page.com",
    "page.com",
    "www.robertwaltersplc.com",
    "robertwaltersplc.com",
];

/// ESG/policy PDFs are filtered out of listings by default.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "sustainability",
    "esg",
    "human rights",
    "modern slavery",
    "tax strategy",
    "gender pay",
    "gri",
    "privacy",
    "policy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Company {
    Hays,
    Pagegroup,
    Robertwalters,
}

impl Company {
    pub fn display_name(&self) -> &'static str {
        match self {
            Company::Hays => "Hays plc",
            Company::Pagegroup => "PageGroup",
            Company::Robertwalters => "Robert Walters plc",
        }
    }

    pub fn all() -> [Company; 3] {
        [Company::Hays, Company::Pagegroup, Company::Robertwalters]
    }
}

/// Per-company results-centre URLs plus the host allow-list. Production
/// uses `Default`; tests construct one pointed at a mock server.
#[derive(Debug, Clone)]
pub struct CompanyRegistry {
    results_urls: HashMap<Company, String>,
    allowed_hosts: HashSet<String>,
}

impl Default for CompanyRegistry {
    fn default() -> Self {
        let results_urls = HashMap::from([
            (Company::Hays, HAYS_RESULTS.to_string()),
            (Company::Pagegroup, PAGE_RESULTS.to_string()),
            (Company::Robertwalters, RW_RESULTS.to_string()),
        ]);
        let allowed_hosts = ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect();
        Self {
            results_urls,
            allowed_hosts,
        }
    }
}

impl CompanyRegistry {
    pub fn new(
        results_urls: HashMap<Company, String>,
        allowed_hosts: HashSet<String>,
    ) -> Self {
        Self {
            results_urls,
            allowed_hosts,
        }
    }

    pub fn results_url(&self, company: Company) -> &str {
        // Every variant is present in both constructors.
        self.results_urls
            .get(&company)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn host_allowed(&self, host: &str) -> bool {
        self.allowed_hosts.contains(host)
    }

    pub fn url_host_allowed(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| self.host_allowed(h)))
            .unwrap_or(false)
    }
}
