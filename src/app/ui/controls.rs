use eframe::egui::{self, RichText, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::engine::model::{MAX_TRUST, MIN_TRUST, Ring};
use crate::engine::style::{degree_label, trust_label};

use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn matching_tags<'a>(tags: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return tags.iter().map(String::as_str).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = tags
        .iter()
        .filter_map(|tag| fuzzy_match_score(&matcher, tag, query).map(|score| (score, tag.as_str())))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.into_iter().map(|(_, tag)| tag).collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Network");
        ui.separator();

        let stats = self.graph.stats();
        ui.label(format!("People: {}", stats.people));
        ui.label(format!("Connections: {}", stats.connections));
        ui.label(format!("Direct: {}", stats.first_degree));
        ui.label(format!("Friends of friends: {}", stats.second_degree));

        ui.separator();
        self.draw_tag_filter(ui);

        ui.separator();
        self.draw_legend(ui);

        ui.separator();
        self.draw_view_status(ui);
    }

    fn draw_view_status(&self, ui: &mut Ui) {
        ui.label(RichText::new("View").strong());
        ui.label(format!("Zoom: {:.0}%", self.engine.camera().zoom * 100.0));
        if let Some(viewport) = self.engine.viewport() {
            ui.label(format!("Canvas: {:.0} × {:.0}", viewport.width, viewport.height));
        }
        if self.engine.is_relaxing() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Relaxing layout...");
            });
        }
        ui.small(format!("{} draw commands", self.frame_items));
    }

    fn draw_tag_filter(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Highlight by tag").strong())
            .on_hover_text("People without any of the chosen tags are dimmed.");
        ui.text_edit_singleline(&mut self.tag_search)
            .on_hover_text("Fuzzy search over every tag in the network.");

        let matches = matching_tags(&self.available_tags, &self.tag_search)
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        ui.horizontal(|ui| {
            let any_matches = !matches.is_empty() && !self.tag_search.trim().is_empty();
            if ui
                .add_enabled(any_matches, egui::Button::new("Highlight matches"))
                .clicked()
            {
                self.interaction.highlighted_tags.extend(matches.iter().cloned());
            }
            if ui
                .add_enabled(
                    !self.interaction.highlighted_tags.is_empty(),
                    egui::Button::new("Clear"),
                )
                .clicked()
            {
                self.interaction.highlighted_tags.clear();
            }
        });

        if matches.is_empty() {
            ui.label("No tags match.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("tag_filter_scroll")
            .max_height(260.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for tag in matches {
                        let active = self.interaction.highlighted_tags.contains(&tag);
                        if ui.selectable_label(active, tag.as_str()).clicked() {
                            if active {
                                self.interaction.highlighted_tags.remove(&tag);
                            } else {
                                self.interaction.highlighted_tags.insert(tag);
                            }
                        }
                    }
                });
            });
    }

    fn draw_legend(&self, ui: &mut Ui) {
        let styles = self.engine.styles();

        ui.label(RichText::new("Degree").strong());
        for ring in [Ring::Center, Ring::First, Ring::Second] {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(vec2(22.0, 14.0), Sense::hover());
                ui.painter()
                    .circle_filled(swatch.center(), 6.0, styles.degree_color(ring));
                ui.label(degree_label(ring));
            });
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Trust").strong());
        for level in (MIN_TRUST..=MAX_TRUST).rev() {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(vec2(22.0, 14.0), Sense::hover());
                ui.painter().line_segment(
                    [swatch.left_center(), swatch.right_center()],
                    Stroke::new(styles.edge(level).width, styles.trust_color(level)),
                );
                ui.label(format!("{level} · {}", trust_label(level)));
            });
        }
    }
}
