// Query-string mirror of the filter spec
//
// Keys: search, region, minPopulation, maxPopulation.
// Only active clauses are written; absent or unparseable numbers read as 0.

use reqwest::Url;

use super::FilterSpec;

const BASE: &str = "http://localhost/";

impl FilterSpec {
    /// Parse a query string such as `?search=fra&minPopulation=1000`
    pub fn from_query(query: &str) -> Self {
        let mut spec = FilterSpec::default();
        let Ok(mut url) = Url::parse(BASE) else {
            return spec;
        };
        url.set_query(Some(query.trim_start_matches('?')));

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "search" => spec.search = value.into_owned(),
                "region" => spec.region = value.into_owned(),
                "minPopulation" => spec.min_population = parse_bound(&value),
                "maxPopulation" => spec.max_population = parse_bound(&value),
                _ => log::debug!("Ignoring unknown query parameter: {}", key),
            }
        }
        spec
    }

    /// Serialize the active clauses, without a leading `?`
    pub fn to_query(&self) -> String {
        let Ok(mut url) = Url::parse(BASE) else {
            return String::new();
        };
        {
            let mut pairs = url.query_pairs_mut();
            if !self.search.is_empty() {
                pairs.append_pair("search", &self.search);
            }
            if !self.region.is_empty() {
                pairs.append_pair("region", &self.region);
            }
            if self.min_population > 0 {
                pairs.append_pair("minPopulation", &self.min_population.to_string());
            }
            if self.max_population > 0 {
                pairs.append_pair("maxPopulation", &self.max_population.to_string());
            }
        }
        url.query().unwrap_or_default().to_string()
    }
}

/// Population bound from a query value, read from its leading digits.
/// No leading digits (including a `-` sign) means unbounded.
fn parse_bound(value: &str) -> u64 {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_all_fields() {
        let spec = FilterSpec::from_query("?search=united+states&region=Americas&minPopulation=1000&maxPopulation=500000000");
        assert_eq!(spec.search, "united states");
        assert_eq!(spec.region, "Americas");
        assert_eq!(spec.min_population, 1000);
        assert_eq!(spec.max_population, 500_000_000);
    }

    #[test]
    fn test_from_query_defaults() {
        assert_eq!(FilterSpec::from_query(""), FilterSpec::default());
        assert_eq!(FilterSpec::from_query("?"), FilterSpec::default());

        let spec = FilterSpec::from_query("minPopulation=lots&maxPopulation=-5&region=Asia");
        assert_eq!(spec.min_population, 0);
        assert_eq!(spec.max_population, 0);
        assert_eq!(spec.region, "Asia");
    }

    #[test]
    fn test_from_query_reads_leading_digits() {
        let spec = FilterSpec::from_query("minPopulation=12000abc&maxPopulation=1000000.5");
        assert_eq!(spec.min_population, 12000);
        assert_eq!(spec.max_population, 1_000_000);

        let spec = FilterSpec::from_query("minPopulation=%2B42&maxPopulation=abc12");
        assert_eq!(spec.min_population, 42);
        assert_eq!(spec.max_population, 0);
    }

    #[test]
    fn test_from_query_percent_decoding() {
        let spec = FilterSpec::from_query("search=%C3%85land");
        assert_eq!(spec.search, "Åland");
    }

    #[test]
    fn test_to_query_only_active_clauses() {
        assert_eq!(FilterSpec::cleared().to_query(), "");

        let spec = FilterSpec {
            search: "new zealand".to_string(),
            region: String::new(),
            min_population: 0,
            max_population: 10_000_000,
        };
        assert_eq!(spec.to_query(), "search=new+zealand&maxPopulation=10000000");
    }

    #[test]
    fn test_query_survives_reparse() {
        let spec = FilterSpec {
            search: "côte & co".to_string(),
            region: "Africa".to_string(),
            min_population: 5,
            max_population: 0,
        };
        assert_eq!(FilterSpec::from_query(&spec.to_query()), spec);
    }
}
