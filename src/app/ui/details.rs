use eframe::egui::{RichText, Ui};

use crate::config::LayoutMode;
use crate::engine::model::Edge;
use crate::engine::style::{degree_label, trust_label};
use crate::network::Person;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Details");
            let has_selection =
                self.interaction.selected_node_id.is_some() || self.selected_edge.is_some();
            if has_selection && ui.small_button("Close").clicked() {
                self.clear_selection();
            }
        });
        ui.add_space(6.0);

        if let Some(id) = self.selected_edge.clone() {
            match self.graph.edge(&id) {
                Some(edge) => self.draw_edge_details(ui, edge),
                None => {
                    ui.label("Selected connection no longer exists.");
                }
            }
            return;
        }

        let Some(id) = self.interaction.selected_node_id.clone() else {
            ui.label("Click a person or a connection in the graph.");
            return;
        };

        match self.graph.person(&id) {
            Some(person) => self.draw_person_details(ui, person),
            None => {
                ui.label("Selected person no longer exists.");
            }
        }
    }

    fn draw_person_details(&self, ui: &mut Ui, person: &Person) {
        let styles = self.engine.styles();
        let ring = person.ring();

        ui.label(RichText::new(&person.name).strong().size(18.0));
        ui.label(RichText::new(degree_label(ring)).color(styles.degree_color(ring)));
        if let Some(city) = &person.city {
            ui.small(city.as_str());
        }
        if self.engine.layout_mode() == LayoutMode::Relaxation
            && self.engine.node(&person.id).is_some_and(|node| node.placement.pinned)
        {
            ui.small("Pinned where you dropped them");
        }

        if !person.tags.is_empty() {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for tag in &person.tags {
                    let highlighted = self.interaction.highlighted_tags.contains(tag);
                    let text = RichText::new(tag.as_str()).small();
                    ui.label(if highlighted { text.strong() } else { text });
                }
            });
        }

        for (title, value) in [
            ("About", &person.bio),
            ("Can help with", &person.offers),
            ("Looking for", &person.seeks),
        ] {
            if let Some(value) = value {
                ui.separator();
                ui.label(RichText::new(title).strong());
                ui.label(value.as_str());
            }
        }

        if person.is_user {
            return;
        }

        ui.separator();
        ui.label(RichText::new("Your connection").strong());
        match self.graph.connection_to_user(&person.id) {
            Some(edge) => self.draw_trust(ui, edge),
            None => {
                ui.label("Reached through a friend.");
            }
        }
    }

    fn draw_edge_details(&self, ui: &mut Ui, edge: &Edge) {
        let name = |id: &str| {
            self.graph
                .person(id)
                .map_or_else(|| id.to_owned(), |person| person.name.clone())
        };

        ui.label(RichText::new(format!("{} and {}", name(&edge.source), name(&edge.target))).strong());
        ui.separator();
        self.draw_trust(ui, edge);
    }

    fn draw_trust(&self, ui: &mut Ui, edge: &Edge) {
        let trust = edge.clamped_trust();
        ui.label(
            RichText::new(format!("Trust {trust}/5 · {}", trust_label(trust)))
                .color(self.engine.styles().trust_color(trust)),
        );
        if let Some(context) = &edge.context {
            ui.label(context.as_str());
        }
    }
}
