// File: crates/chart-core/src/lifecycle.rs
// Summary: Chart instances owning data, canvas, and hover state; full rebuilds on mount, data change, and resize.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::chart::{ChartKind, ChartRenderer};
use crate::geometry::{PrimitiveId, Scene, SourceRef};
use crate::interaction::{Interaction, LogNotifier, Notifier, PointerEvent, Response, Tooltip, TooltipContent};
use crate::types::Viewport;

/// Mounted drawing surface: the viewport read at rebuild time and what was laid out in it.
struct Canvas<M> {
    viewport: Viewport,
    scene: Scene,
    /// `None` while the dataset is empty.
    model: Option<M>,
}

/// One chart on screen. Owns its dataset reference, retained scene, hover
/// state, and resize subscription; every change is a full rebuild.
pub struct ChartInstance<R: ChartRenderer> {
    renderer: R,
    data: Arc<[R::Datum]>,
    canvas: Option<Canvas<R::Model>>,
    interaction: Interaction,
    notifier: Box<dyn Notifier>,
    subscription: Option<ResizeSubscription>,
    rebuilds: usize,
}

impl<R: ChartRenderer> ChartInstance<R> {
    pub fn new(renderer: R, data: impl Into<Arc<[R::Datum]>>) -> Self {
        Self {
            renderer,
            data: data.into(),
            canvas: None,
            interaction: Interaction::new(),
            notifier: Box::new(LogNotifier),
            subscription: None,
            rebuilds: 0,
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn renderer(&self) -> &R { &self.renderer }
    pub fn data(&self) -> &Arc<[R::Datum]> { &self.data }
    pub fn is_mounted(&self) -> bool { self.canvas.is_some() }
    pub fn rebuild_count(&self) -> usize { self.rebuilds }
    pub fn viewport(&self) -> Option<Viewport> { self.canvas.as_ref().map(|c| c.viewport) }
    pub fn scene(&self) -> Option<&Scene> { self.canvas.as_ref().map(|c| &c.scene) }
    pub fn model(&self) -> Option<&R::Model> { self.canvas.as_ref().and_then(|c| c.model.as_ref()) }
    pub fn hovered(&self) -> Option<PrimitiveId> { self.interaction.hovered() }
    pub fn is_subscribed(&self) -> bool { self.subscription.is_some() }

    /// Acquire the canvas at `viewport` and draw.
    pub fn mount(&mut self, viewport: Viewport) {
        self.canvas = Some(Canvas { viewport, scene: Scene::new(viewport), model: None });
        self.rebuild();
    }

    /// Release the canvas and the resize subscription. Later rebuilds are skipped.
    pub fn unmount(&mut self) {
        self.canvas = None;
        self.interaction.reset();
        if self.subscription.take().is_some() {
            debug!(kind = %self.renderer.kind(), "resize listener detached");
        }
    }

    /// Replace the dataset. A different reference rebuilds; the same `Arc` is a no-op.
    pub fn set_data(&mut self, data: impl Into<Arc<[R::Datum]>>) -> bool {
        let data = data.into();
        if Arc::ptr_eq(&self.data, &data) {
            return false;
        }
        self.data = data;
        self.rebuild();
        true
    }

    pub fn resize(&mut self, viewport: Viewport) {
        let Some(canvas) = self.canvas.as_mut() else {
            trace!(kind = %self.renderer.kind(), "resize ignored: not mounted");
            return;
        };
        canvas.viewport = viewport;
        self.rebuild();
    }

    /// Clear the canvas, recompute scales and geometry, and replace the scene.
    pub fn rebuild(&mut self) {
        let Some(canvas) = self.canvas.as_mut() else {
            trace!(kind = %self.renderer.kind(), "rebuild skipped: no canvas");
            return;
        };
        self.interaction.reset();
        if self.data.is_empty() {
            canvas.model = None;
            canvas.scene = Scene::new(canvas.viewport);
        } else {
            let model = self.renderer.prepare(&self.data);
            canvas.scene = self.renderer.layout(&model, canvas.viewport);
            canvas.model = Some(model);
        }
        self.rebuilds += 1;
        debug!(
            kind = %self.renderer.kind(),
            records = self.data.len(),
            primitives = canvas.scene.len(),
            width = canvas.viewport.width,
            height = canvas.viewport.height,
            "rebuilt"
        );
    }

    fn source_of(&self, id: PrimitiveId) -> Option<(SourceRef, &R::Model)> {
        let canvas = self.canvas.as_ref()?;
        let source = canvas.scene.get(id)?.source?;
        Some((source, canvas.model.as_ref()?))
    }

    /// Feed a pointer event; clicks on a primitive notify.
    pub fn pointer(&mut self, event: PointerEvent) -> Response {
        let Some(canvas) = self.canvas.as_ref() else { return Response::None };
        let response = self.interaction.handle(&canvas.scene, event);
        if let Response::Clicked(id) = response {
            let notification = self.source_of(id).and_then(|(source, model)| self.renderer.notification(model, source));
            if let Some(n) = notification {
                self.notifier.notify(&n);
            }
        }
        response
    }

    /// The shared tooltip, present exactly while a primitive is hovered.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let position = self.interaction.tooltip_anchor()?;
        let content = self
            .hovered()
            .and_then(|id| self.source_of(id))
            .map(|(source, model)| self.renderer.tooltip(model, source))
            .unwrap_or_else(TooltipContent::default);
        Some(Tooltip { position, content })
    }
}

/// Object-safe view of a chart instance for mixed collections.
pub trait ChartSurface {
    fn kind(&self) -> ChartKind;
    fn mount(&mut self, viewport: Viewport);
    fn unmount(&mut self);
    fn resize(&mut self, viewport: Viewport);
    fn scene(&self) -> Option<&Scene>;
    fn pointer(&mut self, event: PointerEvent) -> Response;
    fn tooltip(&self) -> Option<Tooltip>;
    fn hovered(&self) -> Option<PrimitiveId>;
    /// Keep `subscription` alive until unmount or drop.
    fn hold_subscription(&mut self, subscription: ResizeSubscription);
}

impl<R: ChartRenderer> ChartSurface for ChartInstance<R> {
    fn kind(&self) -> ChartKind { self.renderer.kind() }
    fn mount(&mut self, viewport: Viewport) { ChartInstance::mount(self, viewport) }
    fn unmount(&mut self) { ChartInstance::unmount(self) }
    fn resize(&mut self, viewport: Viewport) { ChartInstance::resize(self, viewport) }
    fn scene(&self) -> Option<&Scene> { ChartInstance::scene(self) }
    fn pointer(&mut self, event: PointerEvent) -> Response { ChartInstance::pointer(self, event) }
    fn tooltip(&self) -> Option<Tooltip> { ChartInstance::tooltip(self) }
    fn hovered(&self) -> Option<PrimitiveId> { ChartInstance::hovered(self) }
    fn hold_subscription(&mut self, subscription: ResizeSubscription) {
        self.subscription = Some(subscription);
    }
}

/// Subscribe `surface` to `hub`. The listener holds only a weak reference and
/// the subscription lives inside the surface, so unmounting or dropping the
/// chart detaches it. Returns `false` if the surface is busy.
pub fn attach<S>(surface: &Rc<RefCell<S>>, hub: &ResizeHub) -> bool
where
    S: ChartSurface + ?Sized + 'static,
{
    let weak: Weak<RefCell<S>> = Rc::downgrade(surface);
    let subscription = hub.subscribe(move |viewport| {
        let Some(surface) = weak.upgrade() else { return };
        if let Ok(mut surface) = surface.try_borrow_mut() {
            surface.resize(viewport);
        };
    });
    match surface.try_borrow_mut() {
        Ok(mut s) => {
            debug!(kind = %s.kind(), "resize listener attached");
            s.hold_subscription(subscription);
            true
        }
        Err(_) => false,
    }
}

type Listener = Rc<RefCell<dyn FnMut(Viewport)>>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Host-window resize broadcaster.
#[derive(Clone, Default)]
pub struct ResizeHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ResizeHub {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&self, listener: impl FnMut(Viewport) + 'static) -> ResizeSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        inner.listeners.push((id, listener));
        ResizeSubscription { id, hub: Rc::downgrade(&self.inner) }
    }

    /// Call every listener registered at the time of the call.
    pub fn emit(&self, viewport: Viewport) {
        let snapshot: Vec<Listener> = self.inner.borrow().listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in snapshot {
            if let Ok(mut f) = listener.try_borrow_mut() {
                (*f)(viewport);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Registration guard; dropping it removes the listener.
pub struct ResizeSubscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            if let Ok(mut inner) = hub.try_borrow_mut() {
                inner.listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl std::fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeSubscription").field("id", &self.id).finish()
    }
}
