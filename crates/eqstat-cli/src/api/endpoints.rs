//! API endpoint URL builders

/// Build datasets collection URL (upload and history)
pub fn datasets_url(base_url: &str) -> String {
    format!("{}/api/v1/datasets", base_url)
}

/// Build report download URL
pub fn report_url(base_url: &str, id: i64) -> String {
    format!("{}/api/v1/datasets/{}/report", base_url, id)
}

/// Build health check URL
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasets_url() {
        assert_eq!(
            datasets_url("http://localhost:8000"),
            "http://localhost:8000/api/v1/datasets"
        );
    }

    #[test]
    fn test_report_url() {
        assert_eq!(
            report_url("http://localhost:8000", 3),
            "http://localhost:8000/api/v1/datasets/3/report"
        );
    }

    #[test]
    fn test_health_url() {
        assert_eq!(health_url("http://localhost:8000"), "http://localhost:8000/health");
    }
}
