use super::model::Viewport;

#[derive(Debug)]
pub(crate) struct ViewportManager {
    attached: bool,
    current: Option<Viewport>,
    pending: Option<PendingResize>,
    tolerance: f32,
    debounce_secs: f64,
}

#[derive(Clone, Copy, Debug)]
struct PendingResize {
    viewport: Viewport,
    changed_at: f64,
}

impl ViewportManager {
    pub(crate) fn new(tolerance: f32, debounce_secs: f64) -> Self {
        Self {
            attached: false,
            current: None,
            pending: None,
            tolerance,
            debounce_secs,
        }
    }

    pub(crate) fn attach(&mut self) {
        if !self.attached {
            self.attached = true;
            self.current = None;
            self.pending = None;
        }
    }

    pub(crate) fn detach(&mut self) {
        self.attached = false;
        self.pending = None;
    }

    pub(crate) fn current(&self) -> Option<Viewport> {
        self.current
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn observe(&mut self, size: Viewport, now: f64) -> Option<Viewport> {
        if !self.attached || !size.is_usable() {
            return None;
        }

        let Some(current) = self.current else {
            self.current = Some(size);
            return Some(size);
        };

        let reference = self.pending.map_or(current, |pending| pending.viewport);
        if size.differs_from(reference, self.tolerance) {
            self.pending = Some(PendingResize {
                viewport: size,
                changed_at: now,
            });
            return None;
        }

        let pending = self.pending?;
        if now - pending.changed_at < self.debounce_secs {
            return None;
        }

        self.pending = None;
        if pending.viewport.differs_from(current, self.tolerance) {
            self.current = Some(pending.viewport);
            log::debug!(
                "viewport settled at {:.0}x{:.0}",
                pending.viewport.width,
                pending.viewport.height
            );
            Some(pending.viewport)
        } else {
            None
        }
    }
}
