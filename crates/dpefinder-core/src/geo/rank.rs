use tracing::debug;

use super::{GeoIndex, Vincenty, ZipTable};
use crate::error::{Error, Result};
use crate::models::RecordKey;

/// A designee and its distance from the ranking origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry {
    pub key: RecordKey,
    pub miles: f64,
}

/// Orders indexed designees by geodesic distance from an origin zip code.
pub struct DistanceRanker<'a> {
    table: &'a ZipTable,
    vincenty: Vincenty,
}

impl<'a> DistanceRanker<'a> {
    pub fn new(table: &'a ZipTable) -> Self {
        Self {
            table,
            vincenty: Vincenty::default(),
        }
    }

    pub fn with_vincenty(mut self, vincenty: Vincenty) -> Self {
        self.vincenty = vincenty;
        self
    }

    /// Rank every entry of `index` by distance from `origin_zip`, nearest
    /// first. Equal distances are ordered by record key.
    pub fn rank(&self, index: &GeoIndex, origin_zip: &str) -> Result<Vec<RankedEntry>> {
        let origin = self
            .table
            .get(origin_zip)
            .ok_or_else(|| Error::OriginNotFound(origin_zip.to_string()))?;

        let mut ranked = index
            .iter()
            .map(|(key, coord)| {
                self.vincenty
                    .distance_miles(origin, *coord)
                    .map(|miles| RankedEntry { key: *key, miles })
                    .ok_or(Error::Convergence(*key))
            })
            .collect::<Result<Vec<_>>>()?;

        ranked.sort_by(|a, b| a.miles.total_cmp(&b.miles).then_with(|| a.key.cmp(&b.key)));
        debug!(origin = %origin_zip, count = ranked.len(), "Ranked designees by distance");
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::vincenty::{METERS_PER_STATUTE_MILE, WGS84_A};
    use crate::geo::Coordinate;
    use crate::models::{Address, Designee, RecordSet, RecordSource, SearchResponse};

    /// Point on the equator `miles` east of the prime meridian.
    fn equator_east(miles: f64) -> Coordinate {
        Coordinate::new(0.0, (miles * METERS_PER_STATUTE_MILE / WGS84_A).to_degrees())
    }

    fn table() -> ZipTable {
        [
            ("00000", Coordinate::new(0.0, 0.0)),
            ("00010", equator_east(10.0)),
            ("00005", equator_east(5.0)),
            ("00020", equator_east(20.0)),
        ]
        .into_iter()
        .collect()
    }

    fn records(zips: &[&str]) -> RecordSet {
        let data = zips
            .iter()
            .map(|zip| Designee {
                full_name: zip.to_string(),
                address: Address {
                    zip_code: zip.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect::<Vec<_>>();
        let response = SearchResponse {
            total: data.len() as i64,
            data,
            ..Default::default()
        };
        RecordSet::ingest(response, RecordSource::Remote).expect("ingest should succeed")
    }

    #[test]
    fn test_ranks_nearest_first() {
        let table = table();
        let set = records(&["00010", "00005", "00020"]);
        let index = GeoIndex::build(&set, &table);

        let ranked = DistanceRanker::new(&table).rank(&index, "00000").unwrap();

        let miles: Vec<f64> = ranked.iter().map(|r| (r.miles * 1e6).round() / 1e6).collect();
        assert_eq!(miles, vec![5.0, 10.0, 20.0]);

        let zips: Vec<&str> = ranked
            .iter()
            .map(|r| set.get(&r.key).unwrap().address.zip_code.as_str())
            .collect();
        assert_eq!(zips, vec!["00005", "00010", "00020"]);
    }

    #[test]
    fn test_ties_ordered_by_key() {
        let table = table();
        let set = records(&["00010", "00010", "00010"]);
        let index = GeoIndex::build(&set, &table);

        let ranked = DistanceRanker::new(&table).rank(&index, "00000").unwrap();
        let keys: Vec<RecordKey> = ranked.iter().map(|r| r.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_ranking_is_repeatable() {
        let table = table();
        let set = records(&["00020", "00005", "00010", "00005"]);
        let index = GeoIndex::build(&set, &table);
        let ranker = DistanceRanker::new(&table);

        let first = ranker.rank(&index, "00000").unwrap();
        let second = ranker.rank(&index, "00000").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_origin() {
        let table = table();
        let set = records(&["00010"]);
        let index = GeoIndex::build(&set, &table);

        let result = DistanceRanker::new(&table).rank(&index, "99999");
        assert!(matches!(result, Err(Error::OriginNotFound(ref z)) if z == "99999"));
    }

    #[test]
    fn test_origin_is_not_truncated() {
        let table = table();
        let index = GeoIndex::build(&records(&["00010"]), &table);
        let result = DistanceRanker::new(&table).rank(&index, "00000-1234");
        assert!(matches!(result, Err(Error::OriginNotFound(_))));
    }

    #[test]
    fn test_empty_index_ranks_empty() {
        let table = table();
        let ranked = DistanceRanker::new(&table)
            .rank(&GeoIndex::default(), "00000")
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_non_convergence_fails_whole_ranking() {
        let table = table();
        let set = records(&["00005", "00010"]);
        let index = GeoIndex::build(&set, &table);
        let strict = Vincenty {
            max_iterations: 1,
            ..Vincenty::default()
        };

        let result = DistanceRanker::new(&table).with_vincenty(strict).rank(&index, "00000");
        assert!(matches!(result, Err(Error::Convergence(_))));
    }
}
