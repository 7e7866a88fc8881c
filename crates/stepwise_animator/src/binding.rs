// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property binding for animators.
//!
//! A binding is the getter/setter pair through which an animator reads and
//! writes a property it does not own. The closures are reference counted, so
//! whatever state they capture lives as long as any animator holding them.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Reads the current property value
pub type Getter<T> = Rc<dyn Fn() -> T>;

/// Writes a new property value
pub type Setter<T> = Rc<dyn Fn(T)>;

/// Binding of an animator to a property
pub struct PropertyBinding<T> {
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
}

impl<T: 'static> PropertyBinding<T> {
    /// Create a binding from a getter and a setter
    pub fn new(getter: impl Fn() -> T + 'static, setter: impl Fn(T) + 'static) -> Self {
        Self {
            getter: Some(Rc::new(getter)),
            setter: Some(Rc::new(setter)),
        }
    }

    /// Create a binding to a shared cell
    pub fn cell(cell: &Rc<Cell<T>>) -> Self
    where
        T: Copy,
    {
        let read = Rc::clone(cell);
        let write = Rc::clone(cell);
        Self::new(move || read.get(), move |value| write.set(value))
    }

    /// Create a binding to a shared ref cell
    pub fn ref_cell(cell: &Rc<RefCell<T>>) -> Self
    where
        T: Clone,
    {
        let read = Rc::clone(cell);
        let write = Rc::clone(cell);
        Self::new(
            move || read.borrow().clone(),
            move |value| *write.borrow_mut() = value,
        )
    }

    /// Replace the getter
    pub fn with_getter(mut self, getter: impl Fn() -> T + 'static) -> Self {
        self.getter = Some(Rc::new(getter));
        self
    }

    /// Replace the setter
    pub fn with_setter(mut self, setter: impl Fn(T) + 'static) -> Self {
        self.setter = Some(Rc::new(setter));
        self
    }
}

impl<T> PropertyBinding<T> {
    /// Create a binding with neither accessor
    pub fn unbound() -> Self {
        Self {
            getter: None,
            setter: None,
        }
    }

    /// Install a shared getter
    pub fn set_getter(&mut self, getter: Getter<T>) {
        self.getter = Some(getter);
    }

    /// Install a shared setter
    pub fn set_setter(&mut self, setter: Setter<T>) {
        self.setter = Some(setter);
    }

    /// Read the property, if a getter is installed
    pub fn get(&self) -> Option<T> {
        self.getter.as_ref().map(|getter| getter())
    }

    /// Write the property. Returns false when no setter is installed.
    pub fn set(&self, value: T) -> bool {
        match &self.setter {
            Some(setter) => {
                setter(value);
                true
            }
            None => false,
        }
    }

    /// Whether a getter is installed
    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    /// Whether a setter is installed
    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }
}

impl<T> Clone for PropertyBinding<T> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }
}

impl<T> Default for PropertyBinding<T> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<T> fmt::Debug for PropertyBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBinding")
            .field("getter", &self.has_getter())
            .field("setter", &self.has_setter())
            .finish()
    }
}
