use eframe::egui::Color32;

use super::model::{MAX_TRUST, MIN_TRUST, Ring};

pub const GOLD: Color32 = Color32::from_rgb(0xFF, 0xB7, 0x14);
pub const MAGENTA: Color32 = Color32::from_rgb(0xB4, 0x1F, 0x66);
pub const PURPLE: Color32 = Color32::from_rgb(0x78, 0x30, 0x7D);
pub const ORANGE: Color32 = Color32::from_rgb(0xDF, 0x57, 0x38);
pub const SLATE: Color32 = Color32::from_rgb(0x64, 0x74, 0x8B);
pub const BACKGROUND: Color32 = Color32::from_rgb(0x0A, 0x0A, 0x0F);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xF0, 0xF0, 0xF5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    Dimmed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleStyle {
    pub radius: f32,
    pub fill: Color32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle {
    pub color: Color32,
    pub spread: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub radius: f32,
    pub fill: Color32,
    pub initials_color: Color32,
    pub label_color: Color32,
    pub glow: Option<GlowStyle>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub color: Color32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleTable {
    pub user: RoleStyle,
    pub first_degree: RoleStyle,
    pub second_degree: RoleStyle,
    pub user_glow: GlowStyle,
    pub initials_color: Color32,
    pub label_color: Color32,
    pub dimmed_fill_alpha: u8,
    pub dimmed_initials_alpha: u8,
    pub dimmed_label_alpha: u8,
    pub dimmed_radius_scale: f32,
    pub selection_outline: Color32,
    pub selection_outline_width: f32,
    pub trust_palette: [Color32; 5],
    pub edge_alpha: u8,
    pub edge_base_width: f32,
    pub edge_width_per_trust: f32,
    pub label_gap: f32,
    pub label_min_size: f32,
    pub label_max_size: f32,
    pub initials_min_size: f32,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            user: RoleStyle {
                radius: 30.0,
                fill: GOLD,
            },
            first_degree: RoleStyle {
                radius: 22.0,
                fill: MAGENTA,
            },
            second_degree: RoleStyle {
                radius: 16.0,
                fill: PURPLE,
            },
            user_glow: GlowStyle {
                color: Color32::from_rgba_unmultiplied(230, 184, 61, 128),
                spread: 20.0,
            },
            initials_color: BACKGROUND,
            label_color: TEXT_PRIMARY,
            dimmed_fill_alpha: 0x50,
            dimmed_initials_alpha: 0x90,
            dimmed_label_alpha: 0x70,
            dimmed_radius_scale: 1.0,
            selection_outline: Color32::WHITE,
            selection_outline_width: 3.0,
            trust_palette: [SLATE, PURPLE, MAGENTA, ORANGE, GOLD],
            edge_alpha: 0x50,
            edge_base_width: 1.5,
            edge_width_per_trust: 0.3,
            label_gap: 14.0,
            label_min_size: 10.0,
            label_max_size: 13.0,
            initials_min_size: 10.0,
        }
    }
}

impl StyleTable {
    pub fn role(&self, ring: Ring) -> RoleStyle {
        match ring {
            Ring::Center => self.user,
            Ring::First => self.first_degree,
            Ring::Second => self.second_degree,
        }
    }

    pub fn nominal_radius(&self, ring: Ring) -> f32 {
        self.role(ring).radius
    }

    pub fn degree_color(&self, ring: Ring) -> Color32 {
        self.role(ring).fill
    }

    pub fn node(&self, ring: Ring, emphasis: Emphasis) -> NodeStyle {
        let role = self.role(ring);
        let glow = (ring == Ring::Center).then_some(self.user_glow);

        match emphasis {
            Emphasis::Normal => NodeStyle {
                radius: role.radius,
                fill: role.fill,
                initials_color: self.initials_color,
                label_color: self.label_color,
                glow,
            },
            Emphasis::Dimmed => NodeStyle {
                radius: role.radius * self.dimmed_radius_scale,
                fill: with_alpha(role.fill, self.dimmed_fill_alpha),
                initials_color: with_alpha(self.initials_color, self.dimmed_initials_alpha),
                label_color: with_alpha(self.label_color, self.dimmed_label_alpha),
                glow,
            },
        }
    }

    pub fn trust_color(&self, trust_level: u8) -> Color32 {
        let index = trust_level.clamp(MIN_TRUST, MAX_TRUST) - MIN_TRUST;
        self.trust_palette[index as usize]
    }

    pub fn edge(&self, trust_level: u8) -> EdgeStyle {
        let trust = trust_level.clamp(MIN_TRUST, MAX_TRUST);
        EdgeStyle {
            color: with_alpha(self.trust_color(trust), self.edge_alpha),
            width: self.edge_base_width + trust as f32 * self.edge_width_per_trust,
        }
    }

    pub fn label_size(&self, zoom: f32) -> f32 {
        (12.0 / zoom.max(0.0001)).clamp(self.label_min_size, self.label_max_size)
    }

    pub fn initials_size(&self, radius: f32) -> f32 {
        (radius * 0.5).max(self.initials_min_size)
    }
}

pub fn trust_label(trust_level: u8) -> &'static str {
    match trust_level {
        1 => "Low",
        2 => "Casual",
        3 => "Good",
        4 => "Strong",
        5 => "Deep",
        _ => "Unknown",
    }
}

pub fn degree_label(ring: Ring) -> &'static str {
    match ring {
        Ring::Center => "You",
        Ring::First => "1st degree (direct)",
        Ring::Second => "2nd degree (friend of friend)",
    }
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = ((a as u16 * alpha as u16) / 255) as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}
