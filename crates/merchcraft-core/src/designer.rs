//! Scene controller for one product designer instance.
//!
//! The controller owns everything the designer dialog shows: the placed
//! elements, selection and drag tracking, the product configuration and
//! the running price. The UI only ever mutates it through these methods.

use crate::drag::clamp_drop;
use crate::elements::{DesignElement, ElementId, ElementKind, ElementPatch, ImagePayload};
use crate::pricing::{Price, PriceLedger};
use crate::product::{ConfigError, ProductColor, ProductConfig, ProductKind, ProductSize};
use crate::scene::Scene;
use crate::summary::DesignSummary;
use crate::upload::{UploadError, UploadLimits, UploadTicket, encode_upload};
use crate::widget::{Handle, HandleKind, WidgetManager, WidgetState, element_handles, hit_test_handles};
use kurbo::{Point, Rect, Size};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Slack around element boxes when hit testing pointer presses.
pub const HIT_TOLERANCE: f64 = 2.0;

/// Designer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignerConfig {
    /// Logical size of the preview canvas.
    pub canvas_size: Size,
    /// Restrictions applied to uploads.
    pub upload_limits: UploadLimits,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(640.0, 384.0),
            upload_limits: UploadLimits::guidance(),
        }
    }
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    UploadFailed(UploadError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UploadFailed(err) => write!(f, "Upload failed: {err}"),
        }
    }
}

/// State and operations of one designer dialog.
#[derive(Debug)]
pub struct SceneController {
    instance: Uuid,
    config: DesignerConfig,
    product: ProductConfig,
    scene: Scene,
    widgets: WidgetManager,
    ledger: PriceLedger,
    text_input: String,
    mounted: bool,
    next_upload: u64,
    pending_uploads: HashSet<u64>,
    notices: Vec<Notice>,
}

impl SceneController {
    /// Create an empty designer for a product.
    pub fn new(kind: ProductKind) -> Self {
        Self::with_config(kind, DesignerConfig::default())
    }

    /// Create an empty designer with explicit configuration.
    pub fn with_config(kind: ProductKind, config: DesignerConfig) -> Self {
        let instance = Uuid::new_v4();
        log::info!("Designer {instance} opened for {kind}");
        Self {
            instance,
            config,
            product: ProductConfig::new(kind),
            scene: Scene::new(),
            widgets: WidgetManager::new(),
            ledger: PriceLedger::new(kind.base_price()),
            text_input: String::new(),
            mounted: true,
            next_upload: 0,
            pending_uploads: HashSet::new(),
            notices: Vec::new(),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn product(&self) -> &ProductConfig {
        &self.product
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current running price.
    pub fn price(&self) -> Price {
        self.ledger.total()
    }

    // --- Adding elements ---

    /// Add an image from raw file bytes. `None` (no file picked) does
    /// nothing; undecodable bytes queue a notice.
    pub fn add_image(&mut self, file: Option<&[u8]>) -> Option<ElementId> {
        let bytes = file?;
        match encode_upload(bytes, &self.config.upload_limits) {
            Ok(payload) => Some(self.insert(DesignElement::image(payload))),
            Err(err) => {
                self.push_notice(Notice::UploadFailed(err));
                None
            }
        }
    }

    /// Reserve a ticket for an upload decoded elsewhere.
    pub fn begin_upload(&mut self) -> UploadTicket {
        let sequence = self.next_upload;
        self.next_upload += 1;
        self.pending_uploads.insert(sequence);
        UploadTicket {
            instance: self.instance,
            sequence,
        }
    }

    /// Apply a finished upload. Results for another instance, an unknown
    /// ticket, or an unmounted designer are dropped.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<ImagePayload, UploadError>,
    ) -> Option<ElementId> {
        if ticket.instance != self.instance || !self.pending_uploads.remove(&ticket.sequence) {
            log::debug!("Discarding upload with foreign ticket {ticket:?}");
            return None;
        }
        if !self.mounted {
            log::debug!("Discarding upload for closed designer {}", self.instance);
            return None;
        }
        match result {
            Ok(payload) => Some(self.insert(DesignElement::image(payload))),
            Err(err) => {
                self.push_notice(Notice::UploadFailed(err));
                None
            }
        }
    }

    /// Add the pending text input as a text element.
    pub fn add_text(&mut self) -> Option<ElementId> {
        let text = self.text_input.clone();
        self.add_text_str(&text)
    }

    /// Add a text element. Empty or whitespace-only text does nothing.
    pub fn add_text_str(&mut self, text: &str) -> Option<ElementId> {
        if text.trim().is_empty() {
            return None;
        }
        let id = self.insert(DesignElement::text(text));
        self.text_input.clear();
        Some(id)
    }

    pub fn set_text_input(&mut self, text: impl Into<String>) {
        self.text_input = text.into();
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    /// Whether the "add text" button is enabled.
    pub fn can_add_text(&self) -> bool {
        !self.text_input.trim().is_empty()
    }

    fn insert(&mut self, element: DesignElement) -> ElementId {
        let kind = element.kind();
        let id = self.scene.push(element);
        self.ledger.charge(kind);
        log::debug!("Added {} element {id}, price {}", kind.display_name(), self.price());
        id
    }

    // --- Editing ---

    /// Merge a partial update into an element. Unknown ids are ignored.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.scene.get_mut(id) {
            Some(element) => element.apply(patch),
            None => {
                log::debug!("Update for unknown element {id}");
                false
            }
        }
    }

    /// Remove an element and refund its surcharge.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let Some(element) = self.scene.remove(id) else {
            log::debug!("Delete for unknown element {id}");
            return false;
        };
        self.widgets.remove(id);
        self.ledger.refund(element.kind());

        if !self.ledger.is_consistent(self.scene.kinds()) {
            log::warn!(
                "Price ledger out of sync: running {} vs recomputed {}",
                self.ledger.total(),
                self.ledger.reconcile(self.scene.kinds())
            );
        }
        log::debug!("Deleted element {id}, price {}", self.price());
        true
    }

    /// Recomputed price from the current elements.
    pub fn reconciled_price(&self) -> Price {
        self.ledger.reconcile(self.scene.kinds())
    }

    // --- Selection ---

    /// Select an element. Unknown ids are ignored.
    pub fn select(&mut self, id: ElementId) {
        if self.scene.contains(id) {
            self.widgets.select(id);
        } else {
            log::debug!("Select for unknown element {id}");
        }
    }

    pub fn clear_selection(&mut self) {
        self.widgets.clear_selection();
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.widgets.selected()
    }

    /// The selected element, for the controls panel.
    pub fn selected_element(&self) -> Option<&DesignElement> {
        self.widgets.selected().and_then(|id| self.scene.get(id))
    }

    /// Interaction state of an element.
    pub fn widget_state(&self, id: ElementId) -> WidgetState {
        self.widgets.state(id)
    }

    /// Track which element is under the pointer.
    pub fn hover(&mut self, point: Option<Point>) {
        let id = point.and_then(|p| self.element_at(p));
        self.widgets.set_hovered(id);
    }

    // --- Dragging ---

    /// Start a drag gesture on an element. Unknown ids are ignored.
    pub fn begin_drag(&mut self, id: ElementId) {
        if self.scene.contains(id) {
            self.widgets.begin_drag(id);
        }
    }

    /// Drop a dragged element at a pointer position in window coordinates.
    /// Only applies if `id` is the element the drag began on.
    pub fn end_drag(&mut self, id: ElementId, pointer: Point, canvas_bounds: Rect) -> bool {
        if !self.widgets.end_drag(id) {
            log::debug!("Ignoring stale drag end for {id}");
            return false;
        }
        let position = clamp_drop(pointer, canvas_bounds);
        self.update_element(id, &ElementPatch::default().with_position(position))
    }

    /// Abandon a drag gesture, e.g. a press released without moving.
    pub fn cancel_drag(&mut self) {
        if let Some(id) = self.widgets.dragged() {
            log::debug!("Drag on {id} cancelled");
        }
        self.widgets.cancel_drag();
    }

    pub fn dragged_id(&self) -> Option<ElementId> {
        self.widgets.dragged()
    }

    // --- Hit testing ---

    /// Topmost element under a canvas point.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.scene.element_at(point, HIT_TOLERANCE)
    }

    /// Handle of the selected element under a canvas point.
    pub fn handle_at(&self, point: Point) -> Option<HandleKind> {
        self.selected_element()
            .and_then(|element| hit_test_handles(element, point))
    }

    /// Delete affordance of the selected element.
    pub fn delete_handle(&self) -> Option<Handle> {
        let element = self.selected_element()?;
        element_handles(element)
            .into_iter()
            .find(|handle| handle.kind == HandleKind::Delete)
    }

    // --- Product ---

    /// Select a product size. Sizes of another product are rejected.
    pub fn set_product_size(&mut self, size: ProductSize) -> Result<(), ConfigError> {
        self.product.set_size(size).inspect_err(|err| log::warn!("{err}"))
    }

    /// Select a product size by key ("large", "XL", ...).
    pub fn set_product_size_key(&mut self, key: &str) -> Result<(), ConfigError> {
        let size = key.parse::<ProductSize>().inspect_err(|err| log::warn!("{err}"))?;
        self.set_product_size(size)
    }

    pub fn set_product_color(&mut self, color: ProductColor) {
        self.product.set_color(color);
    }

    /// Select a product color by key ("white", "red", ...).
    pub fn set_product_color_key(&mut self, key: &str) -> Result<(), ConfigError> {
        let color = key.parse::<ProductColor>().inspect_err(|err| log::warn!("{err}"))?;
        self.set_product_color(color);
        Ok(())
    }

    // --- Lifecycle ---

    /// Mark the dialog closed. Pending uploads will be discarded.
    pub fn unmount(&mut self) {
        if self.mounted {
            log::info!("Designer {} closed", self.instance);
        }
        self.mounted = false;
        self.pending_uploads.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // --- Notices ---

    fn push_notice(&mut self, notice: Notice) {
        log::warn!("{notice}");
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Snapshot for the "add to cart" button.
    pub fn design_summary(&self) -> DesignSummary {
        DesignSummary {
            product: self.product.kind(),
            size: self.product.size(),
            color: self.product.color(),
            images: self.scene.count(ElementKind::Image),
            texts: self.scene.count(ElementKind::Text),
            price: self.price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::TextColor;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn canvas() -> Rect {
        Rect::from_origin_size(Point::new(10.0, 10.0), Size::new(640.0, 384.0))
    }

    #[test]
    fn test_mug_scenario() {
        let mut designer = SceneController::new(ProductKind::Mug);
        assert_eq!(designer.price(), 350);

        designer.set_text_input("Hi");
        let text = designer.add_text().unwrap();
        assert_eq!(designer.price(), 380);
        assert_eq!(designer.scene().count(ElementKind::Text), 1);
        assert_eq!(designer.text_input(), "");

        let image = designer.add_image(Some(&PNG_MAGIC[..])).unwrap();
        assert_eq!(designer.price(), 430);
        assert_eq!(designer.scene().ids(), vec![text, image]);

        designer.select(text);
        assert!(designer.delete_element(text));
        assert_eq!(designer.price(), 400);
        assert_eq!(designer.scene().ids(), vec![image]);
        assert_eq!(designer.selected_id(), None);
        assert_eq!(designer.reconciled_price(), designer.price());
    }

    #[test]
    fn test_tshirt_base_price() {
        let designer = SceneController::new(ProductKind::TShirt);
        assert_eq!(designer.price(), 450);
        assert_eq!(designer.product().size(), ProductSize::M);
    }

    #[test]
    fn test_invalid_adds_are_noops() {
        let mut designer = SceneController::new(ProductKind::Mug);
        assert_eq!(designer.add_text_str(""), None);
        assert_eq!(designer.add_text_str("   \n\t"), None);
        assert_eq!(designer.add_image(None), None);
        assert!(designer.scene().is_empty());
        assert_eq!(designer.price(), 350);
        assert!(designer.notices().is_empty());

        designer.set_text_input("  ");
        assert!(!designer.can_add_text());
        assert_eq!(designer.add_text(), None);
        // Rejected input stays in the buffer.
        assert_eq!(designer.text_input(), "  ");
    }

    #[test]
    fn test_bad_image_queues_notice() {
        let mut designer = SceneController::new(ProductKind::Mug);
        assert_eq!(designer.add_image(Some(b"not an image".as_slice())), None);
        assert_eq!(designer.price(), 350);
        let notices = designer.take_notices();
        assert_eq!(notices, vec![Notice::UploadFailed(UploadError::UnsupportedFormat)]);
        assert!(designer.notices().is_empty());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let id = designer.add_text_str("Hi").unwrap();
        let stranger = Uuid::new_v4();

        assert!(!designer.delete_element(stranger));
        assert!(!designer.update_element(stranger, &ElementPatch::default().with_rotation(45.0)));
        designer.select(stranger);
        assert_eq!(designer.selected_id(), None);
        assert_eq!(designer.price(), 380);
        assert!(designer.scene().contains(id));
    }

    #[test]
    fn test_single_selection() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let a = designer.add_text_str("a").unwrap();
        let b = designer.add_text_str("b").unwrap();

        designer.select(a);
        designer.select(b);
        assert_eq!(designer.selected_id(), Some(b));
        assert_eq!(designer.widget_state(a), WidgetState::Normal);
        assert_eq!(designer.selected_element().map(DesignElement::id), Some(b));

        // Deleting an unselected element keeps the selection.
        designer.delete_element(a);
        assert_eq!(designer.selected_id(), Some(b));

        designer.clear_selection();
        assert_eq!(designer.selected_element(), None);
    }

    #[test]
    fn test_update_element() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let id = designer.add_text_str("Hi").unwrap();
        let patch = ElementPatch::default()
            .with_uniform_size(120.0)
            .with_rotation(45.0)
            .with_color(TextColor::new(0xff, 0, 0))
            .with_font_size(24.0);
        assert!(designer.update_element(id, &patch));

        let element = designer.scene().get(id).unwrap();
        assert_eq!(element.size, Size::new(120.0, 120.0));
        assert_eq!(element.rotation, 45.0);
        let text = element.as_text().unwrap();
        assert_eq!(text.color.to_hex(), "#ff0000");
        assert_eq!(text.font_size, 24.0);
        assert_eq!(designer.price(), 380);
    }

    #[test]
    fn test_drag_moves_and_clamps() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let id = designer.add_text_str("Hi").unwrap();

        designer.begin_drag(id);
        assert_eq!(designer.dragged_id(), Some(id));
        assert!(designer.end_drag(id, Point::new(110.0, 60.0), canvas()));
        assert_eq!(designer.scene().get(id).unwrap().position, Point::new(100.0, 50.0));
        assert_eq!(designer.dragged_id(), None);

        designer.begin_drag(id);
        designer.end_drag(id, Point::new(5000.0, -40.0), canvas());
        assert_eq!(designer.scene().get(id).unwrap().position, Point::new(590.0, 0.0));
    }

    #[test]
    fn test_stale_drag_end() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let a = designer.add_text_str("a").unwrap();
        let b = designer.add_text_str("b").unwrap();

        // No drag in flight.
        assert!(!designer.end_drag(a, Point::new(300.0, 300.0), canvas()));

        designer.begin_drag(a);
        assert!(!designer.end_drag(b, Point::new(300.0, 300.0), canvas()));
        assert_eq!(designer.scene().get(b).unwrap().position, Point::new(50.0, 50.0));
        assert_eq!(designer.dragged_id(), Some(a));
    }

    #[test]
    fn test_cancel_drag_keeps_position() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let id = designer.add_text_str("Hi").unwrap();
        designer.begin_drag(id);
        designer.cancel_drag();
        assert_eq!(designer.dragged_id(), None);
        assert!(!designer.end_drag(id, Point::new(300.0, 300.0), canvas()));
        assert_eq!(designer.scene().get(id).unwrap().position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_deleting_dragged_element_clears_drag() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let id = designer.add_text_str("Hi").unwrap();
        designer.begin_drag(id);
        designer.delete_element(id);
        assert_eq!(designer.dragged_id(), None);
        assert!(!designer.end_drag(id, Point::new(100.0, 100.0), canvas()));
    }

    #[test]
    fn test_hit_testing() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let text = designer.add_text_str("Hi").unwrap();
        let image = designer.add_image(Some(&PNG_MAGIC[..])).unwrap();

        // Image (50..150) sits on top of the text (50..250, 50..100).
        assert_eq!(designer.element_at(Point::new(60.0, 60.0)), Some(image));
        assert_eq!(designer.element_at(Point::new(200.0, 60.0)), Some(text));
        assert_eq!(designer.element_at(Point::new(400.0, 300.0)), None);

        // Handles only exist on the selection.
        assert_eq!(designer.handle_at(Point::new(250.0, 50.0)), None);
        designer.select(text);
        assert_eq!(designer.handle_at(Point::new(250.0, 50.0)), Some(HandleKind::Delete));
        let handle = designer.delete_handle().unwrap();
        assert!((handle.position - Point::new(250.0, 50.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_product_configuration() {
        let mut designer = SceneController::new(ProductKind::Mug);
        assert_eq!(
            designer.set_product_size(ProductSize::XL),
            Err(ConfigError::UnsupportedSize {
                size: ProductSize::XL,
                product: ProductKind::Mug
            })
        );
        assert_eq!(designer.product().size(), ProductSize::Standard);

        designer.set_product_size_key("large").unwrap();
        assert_eq!(designer.product().size(), ProductSize::Large);
        assert!(designer.set_product_size_key("huge").is_err());
        assert_eq!(designer.product().size(), ProductSize::Large);

        designer.set_product_color_key("red").unwrap();
        assert_eq!(designer.product().color(), ProductColor::Red);
        assert!(designer.set_product_color_key("purple").is_err());
        assert_eq!(designer.product().color(), ProductColor::Red);
        assert_eq!(designer.price(), 350);
    }

    #[test]
    fn test_async_upload() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let ticket = designer.begin_upload();
        let payload = ImagePayload::from_bytes(&PNG_MAGIC).unwrap();

        assert!(designer.complete_upload(ticket, Ok(payload.clone())).is_some());
        assert_eq!(designer.price(), 400);
        // A ticket is single-use.
        assert!(designer.complete_upload(ticket, Ok(payload)).is_none());
        assert_eq!(designer.price(), 400);

        let failed = designer.begin_upload();
        assert!(designer.complete_upload(failed, Err(UploadError::Empty)).is_none());
        assert_eq!(designer.take_notices().len(), 1);
    }

    #[test]
    fn test_upload_after_unmount_discarded() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let ticket = designer.begin_upload();
        designer.unmount();
        assert!(!designer.is_mounted());

        let payload = ImagePayload::from_bytes(&PNG_MAGIC).unwrap();
        assert!(designer.complete_upload(ticket, Ok(payload)).is_none());
        assert!(designer.scene().is_empty());
        assert_eq!(designer.price(), 350);
    }

    #[test]
    fn test_foreign_ticket_discarded() {
        let mut mug = SceneController::new(ProductKind::Mug);
        let mut shirt = SceneController::new(ProductKind::TShirt);
        let ticket = mug.begin_upload();
        assert_eq!(ticket.instance(), mug.instance_id());

        let payload = ImagePayload::from_bytes(&PNG_MAGIC).unwrap();
        assert!(shirt.complete_upload(ticket, Ok(payload)).is_none());
        assert!(shirt.scene().is_empty());
        assert_eq!(shirt.price(), 450);
    }

    #[test]
    fn test_design_summary() {
        let mut designer = SceneController::new(ProductKind::TShirt);
        designer.add_text_str("front").unwrap();
        designer.add_image(Some(&PNG_MAGIC[..])).unwrap();
        designer.set_product_color(ProductColor::Black);

        let summary = designer.design_summary();
        assert_eq!(summary.product, ProductKind::TShirt);
        assert_eq!(summary.color, ProductColor::Black);
        assert_eq!(summary.images, 1);
        assert_eq!(summary.texts, 1);
        assert_eq!(summary.price, 530);
    }

    #[test]
    fn test_hover() {
        let mut designer = SceneController::new(ProductKind::Mug);
        let id = designer.add_text_str("Hi").unwrap();
        designer.hover(Some(Point::new(60.0, 60.0)));
        assert_eq!(designer.widget_state(id), WidgetState::Hovered);
        designer.hover(None);
        assert_eq!(designer.widget_state(id), WidgetState::Normal);
    }
}
