use std::{
    env, fs,
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};

use pystructure::{AnalyzerOptions, Event, Position, Sink, SinkError};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let file_path = if args.len() > 1 { &args[1] } else { "example.py" };
    let code = match read_file(file_path) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let stdout = io::stdout();
    let mut sink = NdjsonSink { writer: stdout.lock() };
    let result = pystructure::analyze(&code, file_path, AnalyzerOptions::default(), &mut sink);
    let elapsed = start.elapsed();

    match result {
        Ok(()) => {
            eprintln!("success after: {elapsed:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error after: {elapsed:?}\n{err}");
            ExitCode::FAILURE
        }
    }
}

/// Reads the source file and appends a trailing newline if absent, so the
/// analyzer always sees a complete final line.
fn read_file(file_path: &str) -> Result<String, String> {
    eprintln!("Reading file: {file_path}");
    match fs::metadata(file_path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(format!("Error: {file_path} is not a file"));
            }
        }
        Err(err) => {
            return Err(format!("Error reading {file_path}: {err}"));
        }
    }
    match fs::read_to_string(file_path) {
        Ok(mut contents) => {
            if !contents.ends_with('\n') {
                contents.push('\n');
            }
            Ok(contents)
        }
        Err(err) => Err(format!("Error reading file: {err}")),
    }
}

/// Renders every event as one line of JSON to the given writer. Rendering,
/// storage, and UI are deliberately left to the sink implementation rather
/// than the core library.
struct NdjsonSink<W> {
    writer: W,
}

impl<W: Write> NdjsonSink<W> {
    fn write_event(&mut self, event: &Event) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, event).map_err(SinkError::new)?;
        self.writer.write_all(b"\n").map_err(SinkError::new)
    }
}

impl<W: Write> Sink for NdjsonSink<W> {
    fn on_encoding(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::Encoding { name: name.to_owned(), position })
    }

    fn on_import(&mut self, module: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::Import { module: module.to_owned(), position })
    }

    fn on_what(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::What { name: name.to_owned(), position })
    }

    fn on_as(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::As { name: name.to_owned(), position })
    }

    fn on_global(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        self.write_event(&Event::Global { name: name.to_owned(), position, level })
    }

    fn on_class_attribute(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        self.write_event(&Event::ClassAttribute { name: name.to_owned(), position, level })
    }

    fn on_instance_attribute(&mut self, name: &str, position: Position, level: i32) -> Result<(), SinkError> {
        self.write_event(&Event::InstanceAttribute { name: name.to_owned(), position, level })
    }

    fn on_class(
        &mut self,
        name: &str,
        name_position: Position,
        class_keyword: Position,
        colon: Position,
        level: i32,
    ) -> Result<(), SinkError> {
        self.write_event(&Event::Class {
            name: name.to_owned(),
            name_position,
            class_keyword,
            colon,
            level,
        })
    }

    fn on_base_class(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::BaseClass { text: text.to_owned(), position })
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
        self.write_event(&Event::Function {
            name: name.to_owned(),
            name_position,
            def_keyword,
            colon,
            level,
            is_async,
            return_annotation: return_annotation.to_owned(),
        })
    }

    fn on_argument(&mut self, name: &str, annotation: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::Argument {
            name: name.to_owned(),
            annotation: annotation.to_owned(),
            position,
        })
    }

    fn on_argument_value(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::ArgumentValue { text: text.to_owned(), position })
    }

    fn on_decorator(&mut self, name: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::Decorator { name: name.to_owned(), position })
    }

    fn on_decorator_argument(&mut self, text: &str, position: Position) -> Result<(), SinkError> {
        self.write_event(&Event::DecoratorArgument { text: text.to_owned(), position })
    }

    fn on_docstring(&mut self, text: &str, start_line: u32, end_line: u32) -> Result<(), SinkError> {
        self.write_event(&Event::Docstring { text: text.to_owned(), start_line, end_line })
    }

    fn on_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.write_event(&Event::Error { message: message.to_owned() })
    }

    fn on_lexer_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.write_event(&Event::LexerError { message: message.to_owned() })
    }
}
