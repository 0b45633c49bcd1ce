//! Conversions between the two widget views, and lazily built widgets.
//!
//! Both views share one record, so conversion is a projection and the
//! round trip preserves identity.

use crate::widget::{AbstractWidget, ConcreteWidget};
use std::cell::RefCell;
use std::rc::Rc;

pub fn abstract_widget(w: ConcreteWidget) -> AbstractWidget {
    AbstractWidget(w.0)
}

pub fn concrete_widget(w: AbstractWidget) -> ConcreteWidget {
    ConcreteWidget(w.0)
}

pub fn abstract_widgets(a: &[ConcreteWidget]) -> Vec<AbstractWidget> {
    a.iter().cloned().map(abstract_widget).collect()
}

pub fn concrete_widgets(a: &[AbstractWidget]) -> Vec<ConcreteWidget> {
    a.iter().cloned().map(concrete_widget).collect()
}

enum PromiseState<T> {
    Pending(Box<dyn FnOnce() -> T>),
    Forcing,
    Forced(T),
}

/// A lazily evaluated value, forced at most once.
pub struct Promise<T>(Rc<RefCell<PromiseState<T>>>);

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Promise(self.0.clone())
    }
}

impl<T: Clone + 'static> Promise<T> {
    pub fn new(thunk: impl FnOnce() -> T + 'static) -> Self {
        Promise(Rc::new(RefCell::new(PromiseState::Pending(Box::new(thunk)))))
    }

    /// An already-forced promise.
    pub fn ready(value: T) -> Self {
        Promise(Rc::new(RefCell::new(PromiseState::Forced(value))))
    }

    /// Evaluates the thunk on first use and caches the result.
    pub fn force(&self) -> T {
        if let PromiseState::Forced(v) = &*self.0.borrow() {
            return v.clone();
        }
        let thunk = match std::mem::replace(&mut *self.0.borrow_mut(), PromiseState::Forcing) {
            PromiseState::Pending(t) => t,
            PromiseState::Forcing => panic!("promise forced from within its own thunk"),
            PromiseState::Forced(_) => unreachable!(),
        };
        let value = thunk();
        *self.0.borrow_mut() = PromiseState::Forced(value.clone());
        value
    }
}

/// Defers the view conversion until the underlying promise is forced.
pub fn abstract_promise(p: Promise<ConcreteWidget>) -> Promise<AbstractWidget> {
    Promise::new(move || abstract_widget(p.force()))
}

pub fn concrete_promise(p: Promise<AbstractWidget>) -> Promise<ConcreteWidget> {
    Promise::new(move || concrete_widget(p.force()))
}
