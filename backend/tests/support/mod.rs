#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use swiss_rents::models::BucketingPolicy;
use swiss_rents::store::DataSources;
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Panic-safe (restores variables on unwind) and serializes access to
/// process-global env vars across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub const LISTING_HEADER: &str =
    "Adresse,Ort,Kanton,Zimmer,Fläche,Mietpreis_Brutto,Wohnungstyp,Bezugsdatum,Quadratmeterpreis_Brutto,lat,lon";

/// Five complete rows and one with a missing room count.
pub const LISTING_ROWS: [&str; 6] = [
    "Bahnhofstrasse 1,Bern,BE,3.5,80,1850,Wohnung,2019-04-01,23.1,46.948,7.4474",
    "Marktgasse 5,Bern,BE,2,45,1100,,2019-06-01,24.4,46.947,7.445",
    "Seeweg 4,Zug,ZG,2,55,3100,Studio,2019-05-01,56.4,47.166,8.515",
    "Limmatquai 9,Zürich,ZH,4.5,110,2600,Attikawohnung,2019-07-01,23.6,47.372,8.543",
    "Hauptstrasse 2,Chur,GR,3,75,1150,Wohnung,2019-08-01,15.3,46.85,9.53",
    "Ringweg 7,Thun,BE,,60,1300,Wohnung,2019-09-01,21.7,46.75,7.62",
];

pub const BOUNDARIES_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {"kan_code": "BE", "kan_name": "Bern"},
      "geometry": {"type": "Polygon", "coordinates": [[[7.0, 46.5], [8.0, 46.5], [8.0, 47.0], [7.0, 46.5]]]}
    },
    {
      "type": "Feature",
      "properties": {"kan_code": "ZH", "kan_name": "Zürich"},
      "geometry": {"type": "Polygon", "coordinates": [[[8.3, 47.2], [8.9, 47.2], [8.9, 47.6], [8.3, 47.2]]]}
    }
  ]
}"#;

pub fn listing_csv(rows: &[&str]) -> String {
    let mut content = String::from(LISTING_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

/// Source files on disk, removed when dropped.
pub struct Fixture {
    pub dir: TempDir,
    pub listings_path: PathBuf,
    pub boundaries_path: PathBuf,
}

impl Fixture {
    pub fn new(listings_csv: &str, boundaries_geojson: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let listings_path = dir.path().join("rents.csv");
        let boundaries_path = dir.path().join("kantone.geojson");
        fs::write(&listings_path, listings_csv).unwrap();
        fs::write(&boundaries_path, boundaries_geojson).unwrap();
        Self {
            dir,
            listings_path,
            boundaries_path,
        }
    }

    pub fn standard() -> Self {
        Self::new(&listing_csv(&LISTING_ROWS), BOUNDARIES_GEOJSON)
    }

    pub fn sources(&self, policy: BucketingPolicy) -> DataSources {
        DataSources::new(&self.listings_path, &self.boundaries_path, policy)
    }
}
