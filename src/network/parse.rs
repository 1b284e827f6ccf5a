use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::engine::model::Edge;

use super::graph::{NetworkGraph, Person};

const MAX_DEGREE: u32 = 2;

#[derive(Debug, Deserialize)]
struct RawNetwork {
    #[serde(default)]
    nodes: Vec<RawPerson>,
    #[serde(default)]
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPerson {
    id: String,
    name: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    is_user: bool,
    #[serde(default)]
    degree: Option<u32>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    offers: Option<String>,
    #[serde(default)]
    seeks: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

pub fn parse_network_json(raw: &str) -> Result<NetworkGraph> {
    let parsed: Value = serde_json::from_str(raw).context("invalid network JSON")?;
    let graph = unwrap_envelope(parsed)?;
    let network =
        RawNetwork::deserialize(graph).context("network JSON is missing node or edge fields")?;
    build_graph(network)
}

fn unwrap_envelope(value: Value) -> Result<Value> {
    let Value::Object(mut object) = value else {
        bail!("network JSON must be an object");
    };
    let Some(data) = object.remove("data") else {
        return Ok(Value::Object(object));
    };
    let Value::Object(mut data) = data else {
        bail!("\"data\" must be an object");
    };
    data.remove("graph")
        .ok_or_else(|| anyhow!("\"data\" has no \"graph\" field"))
}

fn build_graph(network: RawNetwork) -> Result<NetworkGraph> {
    let mut seen = HashSet::with_capacity(network.nodes.len());
    let mut raw_people = Vec::with_capacity(network.nodes.len());
    for raw in network.nodes {
        if raw.id.trim().is_empty() {
            log::warn!("skipping person {:?} without an id", raw.name);
            continue;
        }
        if !seen.insert(raw.id.clone()) {
            log::warn!("duplicate person id {}; keeping the first record", raw.id);
            continue;
        }
        raw_people.push(raw);
    }

    let users = raw_people.iter().filter(|raw| raw.is_user).count();
    if users > 1 {
        bail!("{users} people are marked as the user; expected exactly one");
    }

    let mut edges = network.edges;
    let before = edges.len();
    edges.retain(|edge| seen.contains(&edge.source) && seen.contains(&edge.target));
    if edges.len() < before {
        log::warn!(
            "dropped {} connections that reference unknown people",
            before - edges.len()
        );
    }

    let needs_degrees = raw_people
        .iter()
        .any(|raw| !raw.is_user && raw.degree.is_none());
    let derived = if needs_degrees {
        let user = raw_people
            .iter()
            .find(|raw| raw.is_user)
            .ok_or_else(|| anyhow!("cannot derive degrees: nobody is marked as the user"))?;
        degrees_from(&user.id, &edges)
    } else {
        HashMap::new()
    };

    let mut unreachable = 0usize;
    let people = raw_people
        .into_iter()
        .filter_map(|raw| {
            let degree = if raw.is_user {
                0
            } else if let Some(degree) = raw.degree {
                degree
            } else if let Some(&degree) = derived.get(&raw.id) {
                degree
            } else {
                unreachable += 1;
                return None;
            };

            Some(Person {
                id: raw.id,
                name: raw.name,
                tags: raw.tags.into_iter().collect(),
                is_user: raw.is_user,
                degree,
                bio: raw.bio,
                offers: raw.offers,
                seeks: raw.seeks,
                city: raw.city,
            })
        })
        .collect::<Vec<_>>();

    if unreachable > 0 {
        log::info!("left out {unreachable} people more than {MAX_DEGREE} hops from the user");
        let kept = people
            .iter()
            .map(|person| person.id.as_str())
            .collect::<HashSet<_>>();
        edges.retain(|edge| kept.contains(edge.source.as_str()) && kept.contains(edge.target.as_str()));
    }

    Ok(NetworkGraph::new(people, edges))
}

fn degrees_from<'a>(user_id: &'a str, edges: &'a [Edge]) -> HashMap<String, u32> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency.entry(&edge.source).or_default().push(&edge.target);
        adjacency.entry(&edge.target).or_default().push(&edge.source);
    }

    let mut degrees = HashMap::from([(user_id.to_owned(), 0)]);
    let mut queue = VecDeque::from([(user_id, 0u32)]);
    while let Some((id, degree)) = queue.pop_front() {
        if degree >= MAX_DEGREE {
            continue;
        }
        for &next in adjacency.get(id).into_iter().flatten() {
            if !degrees.contains_key(next) {
                degrees.insert(next.to_owned(), degree + 1);
                queue.push_back((next, degree + 1));
            }
        }
    }

    degrees
}
