use std::collections::{BTreeSet, HashMap};

use crate::engine::model::{Edge, Node, Ring};

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub tags: BTreeSet<String>,
    pub is_user: bool,
    pub degree: u32,
    pub bio: Option<String>,
    pub offers: Option<String>,
    pub seeks: Option<String>,
    pub city: Option<String>,
}

impl Person {
    pub fn to_node(&self) -> Node {
        Node {
            id: self.id.clone(),
            name: self.name.clone(),
            tags: self.tags.clone(),
            is_user: self.is_user,
            degree: self.degree,
        }
    }

    pub fn ring(&self) -> Ring {
        Ring::classify(self.is_user, self.degree)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkStats {
    pub people: usize,
    pub connections: usize,
    pub first_degree: usize,
    pub second_degree: usize,
}

#[derive(Clone, Debug, Default)]
pub struct NetworkGraph {
    pub people: Vec<Person>,
    pub edges: Vec<Edge>,
    index_by_id: HashMap<String, usize>,
}

impl NetworkGraph {
    pub fn new(people: Vec<Person>, edges: Vec<Edge>) -> Self {
        let index_by_id = people
            .iter()
            .enumerate()
            .map(|(index, person)| (person.id.clone(), index))
            .collect();
        Self {
            people,
            edges,
            index_by_id,
        }
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.index_by_id.get(id).and_then(|&index| self.people.get(index))
    }

    pub fn user(&self) -> Option<&Person> {
        self.people.iter().find(|person| person.is_user)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.people.iter().map(Person::to_node).collect()
    }

    pub fn available_tags(&self) -> Vec<String> {
        self.people
            .iter()
            .flat_map(|person| person.tags.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn connection_to_user(&self, id: &str) -> Option<&Edge> {
        let user = self.user()?;
        if user.id == id {
            return None;
        }
        self.edges
            .iter()
            .find(|edge| edge.touches(&user.id) && edge.touches(id))
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            people: self.people.len(),
            connections: self.edges.len(),
            first_degree: self
                .people
                .iter()
                .filter(|person| person.ring() == Ring::First)
                .count(),
            second_degree: self
                .people
                .iter()
                .filter(|person| person.ring() == Ring::Second)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, degree: u32, tags: &[&str]) -> Person {
        Person {
            id: id.to_owned(),
            name: id.to_owned(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            is_user: degree == 0,
            degree,
            bio: None,
            offers: None,
            seeks: None,
            city: None,
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
            trust_level: 4,
            context: Some("worked together".to_owned()),
        }
    }

    fn sample() -> NetworkGraph {
        NetworkGraph::new(
            vec![
                person("u", 0, &["product"]),
                person("a", 1, &["design", "product"]),
                person("b", 2, &["vc"]),
            ],
            vec![edge("ua", "u", "a"), edge("ab", "a", "b")],
        )
    }

    #[test]
    fn tags_are_sorted_and_unique() {
        assert_eq!(sample().available_tags(), ["design", "product", "vc"]);
    }

    #[test]
    fn connection_to_user_is_direct_only() {
        let graph = sample();
        assert_eq!(graph.connection_to_user("a").map(|edge| edge.id.as_str()), Some("ua"));
        assert_eq!(graph.connection_to_user("b"), None);
        assert_eq!(graph.connection_to_user("u"), None);
    }

    #[test]
    fn stats_count_rings() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            NetworkStats {
                people: 3,
                connections: 2,
                first_degree: 1,
                second_degree: 1,
            }
        );
    }

    #[test]
    fn lookups_by_id() {
        let graph = sample();
        assert_eq!(graph.user().map(|user| user.id.as_str()), Some("u"));
        assert_eq!(graph.person("b").map(|person| person.degree), Some(2));
        assert!(graph.person("z").is_none());
        assert_eq!(graph.edge("ab").map(|edge| edge.target.as_str()), Some("b"));
        assert_eq!(graph.nodes().len(), 3);
    }
}
