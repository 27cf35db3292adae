//! The sink capability set: one handler per emitted event kind, plus an
//! owned [`Event`] enum and two test/embedding doubles.
//!
//! Modeled after the teacher's [`VmTracer`](https://github.com/parcadei/ouros)
//! hook-trait pattern: every handler has a no-op default so a sink only
//! overrides the events it cares about, and handler failures propagate via
//! `Result` instead of the panicking/exception path a tracer embedded in an
//! interpreter would use.

use crate::{error::SinkError, position::Position};

/// Receives structural events as the walker descends the tree, in strict
/// source order.
///
/// Every method defaults to a no-op; implement only the events you need.
/// A handler that returns `Err` aborts the walk — the error is propagated
/// out of [`crate::analyze`] as a [`SinkError`].
#[allow(unused_variables)]
pub trait Sink {
    /// PEP 263 encoding declaration, emitted before any other event.
    fn on_encoding(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// `import a.b.c` (one event per dotted name in the statement).
    fn on_import(&mut self, module: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// One `what` per name in a `from ... import what[, what as alias]` list.
    fn on_what(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// `as NAME` alias, following the `import`/`what` event it renames.
    fn on_as(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// Module-level variable declaration (`NAME = ...` at global scope).
    fn on_global(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        Ok(())
    }

    /// Class-body variable declaration, outside any method.
    fn on_class_attribute(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        Ok(())
    }

    /// `self.NAME = ...` inside a (non-static) method.
    fn on_instance_attribute(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        Ok(())
    }

    /// A `class` statement. Followed by its own `base_class`/`docstring`/body
    /// events before any sibling event.
    #[allow(clippy::too_many_arguments)]
    fn on_class(
        &mut self,
        name: &str,
        name_position: Position,
        class_keyword: Position,
        colon: Position,
        level: i32,
    ) -> Result<(), SinkError> {
        Ok(())
    }

    /// One event per base-class / class-keyword expression in `class C(...)`.
    fn on_base_class(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// A `def`/`async def` statement, carrying its own signature shape.
    #[allow(clippy::too_many_arguments)]
    fn on_function(
        &mut self,
        name: &str,
        name_position: Position,
        def_keyword: Position,
        colon: Position,
        level: i32,
        is_async: bool,
        return_annotation: &str,
    ) -> Result<(), SinkError> {
        Ok(())
    }

    /// One event per formal parameter, in declaration order. `*args` and
    /// `**kwargs` carry their name prefixed with `*`/`**`; a bare `*`
    /// separator carries name `"*"` and an empty annotation.
    fn on_argument(&mut self, name: &str, annotation: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// One event per default value, in the order they appear (tail-aligned
    /// to parameters by the sink: the last N parameters are the ones with
    /// defaults).
    fn on_argument_value(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// A decorator applied to the next class/function, emitted before it.
    fn on_decorator(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// One event per argument to a decorator call (`@d(a, b)`), or a single
    /// empty-payload event for an empty call (`@d()`).
    fn on_decorator_argument(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        Ok(())
    }

    /// A module/class/function docstring.
    fn on_docstring(&mut self, text: &str, start_line: u32, end_line: u32) -> Result<(), SinkError> {
        Ok(())
    }

    /// The concrete parser failed to produce a tree; no further events follow.
    fn on_error(&mut self, message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    /// Reserved for forward compatibility; never emitted today.
    fn on_lexer_error(&mut self, message: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

/// An owned copy of one emitted event, used by [`RecordingSink`] and by
/// embedders who want a value instead of a stream of callbacks.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Event {
    /// See [`Sink::on_encoding`].
    Encoding { name: String, position: Position },
    /// See [`Sink::on_import`].
    Import { module: String, position: Position },
    /// See [`Sink::on_what`].
    What { name: String, position: Position },
    /// See [`Sink::on_as`].
    As { name: String, position: Position },
    /// See [`Sink::on_global`].
    Global { name: String, position: Position, level: i32 },
    /// See [`Sink::on_class_attribute`].
    ClassAttribute { name: String, position: Position, level: i32 },
    /// See [`Sink::on_instance_attribute`].
    InstanceAttribute { name: String, position: Position, level: i32 },
    /// See [`Sink::on_class`].
    Class {
        name: String,
        name_position: Position,
        class_keyword: Position,
        colon: Position,
        level: i32,
    },
    /// See [`Sink::on_base_class`].
    BaseClass { text: String, position: Position },
    /// See [`Sink::on_function`].
    Function {
        name: String,
        name_position: Position,
        def_keyword: Position,
        colon: Position,
        level: i32,
        is_async: bool,
        return_annotation: String,
    },
    /// See [`Sink::on_argument`].
    Argument {
        name: String,
        annotation: String,
        position: Position,
    },
    /// See [`Sink::on_argument_value`].
    ArgumentValue { text: String, position: Position },
    /// See [`Sink::on_decorator`].
    Decorator { name: String, position: Position },
    /// See [`Sink::on_decorator_argument`].
    DecoratorArgument { text: String, position: Position },
    /// See [`Sink::on_docstring`].
    Docstring { text: String, start_line: u32, end_line: u32 },
    /// See [`Sink::on_error`].
    Error { message: String },
    /// See [`Sink::on_lexer_error`].
    LexerError { message: String },
}

/// A [`Sink`] that discards every event. Useful when only the return value
/// (success/failure) of a call matters.
#[derive(Debug, Default)]
pub struct NoopSink;

impl Sink for NoopSink {}

/// A [`Sink`] that records every event into a `Vec<Event>`, in source order.
///
/// The primary test double for this crate and a usable starting point for
/// embedders who would rather collect a value than drive callbacks.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far, in emission order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the recorder, returning the collected events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Sink for RecordingSink {
    fn on_encoding(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::Encoding {
            name: name.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_import(&mut self, module: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::Import {
            module: module.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_what(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::What {
            name: name.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_as(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::As {
            name: name.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_global(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        self.events.push(Event::Global {
            name: name.to_owned(),
            position,
            level,
        });
        Ok(())
    }

    fn on_class_attribute(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        self.events.push(Event::ClassAttribute {
            name: name.to_owned(),
            position,
            level,
        });
        Ok(())
    }

    fn on_instance_attribute(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        self.events.push(Event::InstanceAttribute {
            name: name.to_owned(),
            position,
            level,
        });
        Ok(())
    }

    fn on_class(
        &mut self,
        name: &str,
        name_position: Position,
        class_keyword: Position,
        colon: Position,
        level: i32,
    ) -> Result<(), SinkError> {
        self.events.push(Event::Class {
            name: name.to_owned(),
            name_position,
            class_keyword,
            colon,
            level,
        });
        Ok(())
    }

    fn on_base_class(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::BaseClass {
            text: text.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_function(
        &mut self,
        name: &str,
        name_position: Position,
        def_keyword: Position,
        colon: Position,
        level: i32,
        is_async: bool,
        return_annotation: &str,
    ) -> Result<(), SinkError> {
        self.events.push(Event::Function {
            name: name.to_owned(),
            name_position,
            def_keyword,
            colon,
            level,
            is_async,
            return_annotation: return_annotation.to_owned(),
        });
        Ok(())
    }

    fn on_argument(&mut self, name: &str, annotation: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::Argument {
            name: name.to_owned(),
            annotation: annotation.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_argument_value(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::ArgumentValue {
            text: text.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_decorator(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::Decorator {
            name: name.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_decorator_argument(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        self.events.push(Event::DecoratorArgument {
            text: text.to_owned(),
            position,
        });
        Ok(())
    }

    fn on_docstring(&mut self, text: &str, start_line: u32, end_line: u32) -> Result<(), SinkError> {
        self.events.push(Event::Docstring {
            text: text.to_owned(),
            start_line,
            end_line,
        });
        Ok(())
    }

    fn on_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.events.push(Event::Error {
            message: message.to_owned(),
        });
        Ok(())
    }

    fn on_lexer_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.events.push(Event::LexerError {
            message: message.to_owned(),
        });
        Ok(())
    }
}
