mod graph;
mod parse;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use graph::{NetworkGraph, Person};
pub use parse::parse_network_json;

const DEMO_NETWORK: &str = include_str!("demo_network.json");

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphSource {
    Demo,
    File(PathBuf),
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demo => f.write_str("bundled demo network"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn load_network(source: &GraphSource) -> Result<NetworkGraph> {
    let graph = match source {
        GraphSource::Demo => {
            parse_network_json(DEMO_NETWORK).context("bundled demo network is invalid")?
        }
        GraphSource::File(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read network file {}", path.display()))?;
            parse_network_json(&raw)
                .with_context(|| format!("failed to parse network file {}", path.display()))?
        }
    };

    log::info!(
        "loaded {} people and {} connections from {source}",
        graph.people.len(),
        graph.edges.len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_network_has_two_rings_around_the_user() {
        let graph = load_network(&GraphSource::Demo).unwrap();
        let stats = graph.stats();

        assert_eq!(stats.people, 13);
        assert_eq!(stats.connections, 18);
        assert_eq!(stats.first_degree, 6);
        assert_eq!(stats.second_degree, 6);
        assert_eq!(graph.user().map(|user| user.name.as_str()), Some("You"));
        assert_eq!(
            graph.connection_to_user("alex-chen").map(|edge| edge.trust_level),
            Some(5)
        );
    }

    #[test]
    fn loads_a_network_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.json");
        fs::write(
            &path,
            r#"{"nodes": [
                {"id": "u", "name": "You", "isUser": true},
                {"id": "a", "name": "Alex"}
            ], "edges": [{"id": "ua", "source": "u", "target": "a", "trustLevel": 2}]}"#,
        )
        .unwrap();

        let graph = load_network(&GraphSource::File(path)).unwrap();
        assert_eq!(graph.person("a").map(|person| person.degree), Some(1));
    }

    #[test]
    fn file_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let error = load_network(&GraphSource::File(missing.clone())).unwrap_err();
        assert!(format!("{error:#}").contains(&missing.display().to_string()));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();
        let error = load_network(&GraphSource::File(broken)).unwrap_err();
        assert!(format!("{error:#}").contains("failed to parse network file"));
    }
}
