use std::cell::RefCell;
use std::rc::Rc;

use timeline_core::{watch_prefetch, IntersectionSource, PrefetchOnce, Unsubscribe};

type Callback = Box<dyn FnMut(bool)>;

/// Intersection source driven by hand.
#[derive(Default, Clone)]
struct FakeObserver {
    callback: Rc<RefCell<Option<Callback>>>,
    margins: Rc<RefCell<Vec<f64>>>,
    disconnects: Rc<RefCell<usize>>,
}

impl FakeObserver {
    fn emit(&self, intersecting: bool) {
        let taken = self.callback.borrow_mut().take();
        if let Some(mut callback) = taken {
            callback(intersecting);
            if *self.disconnects.borrow() == 0 {
                *self.callback.borrow_mut() = Some(callback);
            }
        }
    }

    fn is_observing(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

impl IntersectionSource for FakeObserver {
    fn observe(&self, margin_px: f64, on_change: Box<dyn FnMut(bool)>) -> Unsubscribe {
        self.margins.borrow_mut().push(margin_px);
        *self.callback.borrow_mut() = Some(on_change);
        let callback = Rc::clone(&self.callback);
        let disconnects = Rc::clone(&self.disconnects);
        Unsubscribe::new(move || {
            *disconnects.borrow_mut() += 1;
            callback.borrow_mut().take();
        })
    }
}

#[test]
fn trigger_fires_on_first_intersection_only() {
    let mut trigger = PrefetchOnce::new(Some("/img/next.png".to_string()));
    assert_eq!(trigger.on_intersection(false), None);
    assert_eq!(trigger.on_intersection(true), Some("/img/next.png"));
    assert_eq!(trigger.on_intersection(true), None);
    assert!(trigger.has_fired());
}

#[test]
fn enter_leave_enter_prefetches_once() {
    let observer = FakeObserver::default();
    let hints = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&hints);

    let handle = watch_prefetch(
        &observer,
        Some("/img/next.png".to_string()),
        200.0,
        move |href| sink.borrow_mut().push(href.to_string()),
    );
    assert_eq!(*observer.margins.borrow(), vec![200.0]);

    observer.emit(false);
    observer.emit(true);
    observer.emit(false);
    observer.emit(true);

    assert_eq!(*hints.borrow(), vec!["/img/next.png".to_string()]);
    assert_eq!(*observer.disconnects.borrow(), 1);
    assert!(!observer.is_observing());

    drop(handle);
    assert_eq!(*observer.disconnects.borrow(), 1);
}

#[test]
fn unmount_before_intersection_disconnects() {
    let observer = FakeObserver::default();
    let handle = watch_prefetch(&observer, Some("/img/next.png".to_string()), 200.0, |_| {
        panic!("must not prefetch after unmount")
    });
    assert!(observer.is_observing());

    handle.unsubscribe();
    assert_eq!(*observer.disconnects.borrow(), 1);
    observer.emit(true);
}

#[test]
fn last_card_has_nothing_to_observe() {
    let observer = FakeObserver::default();
    let handle = watch_prefetch(&observer, None, 200.0, |_| {});
    assert!(!handle.is_active());
    assert!(observer.margins.borrow().is_empty());
}
