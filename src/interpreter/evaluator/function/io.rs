use std::{
    fs::{self, OpenOptions},
    io::Write,
};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        resource::FileMode,
        value::core::Value,
    },
};

/// Prints its arguments separated by spaces, followed by a newline.
///
/// Strings are written without quotes. Returns `None`, so a bare
/// `print(x).` statement prints only once.
///
/// # Example
/// ```
/// use scriptit::interpreter::{
///     evaluator::{core::Context, function::io::print},
///     io::SharedOutput,
///     value::core::Value,
/// };
///
/// let output = SharedOutput::new();
/// let mut context = Context::with_io(output.clone(), std::io::empty());
///
/// let result = print(&mut context, &[Value::from("x ="), Value::Integer(42)], 1).unwrap();
///
/// assert_eq!(result, Value::None);
/// assert_eq!(output.contents(), "x = 42\n");
/// ```
pub fn print(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let text = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
    context.write_line(&text, line)?;
    Ok(Value::None)
}

/// Prints one value in its multi-line pretty form.
pub fn pprint(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    context.write_line(&args[0].pretty(), line)?;
    Ok(Value::None)
}

/// Prints the optional prompt and returns one line of input.
pub fn input(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    if let Some(prompt) = args.first() {
        context.write_prompt(&prompt.to_string(), line)?;
    }
    Ok(Value::Str(context.read_input_line(line)?))
}

/// The whole contents of a file, given a path or a handle opened for
/// reading.
fn read_contents(context: &mut Context, target: &Value, what: &str, line: usize) -> EvalResult<String> {
    if let Some(id) = context.files.handle_id(target) {
        return context.files.read_to_string(id, line);
    }

    let path = target.as_str(what, line)?;
    fs::read_to_string(path).map_err(|e| RuntimeError::Io { details: format!("Cannot open file '{path}': {e}"),
                                                            line })
}

/// Returns the contents of a file as one string.
pub fn read(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Str(read_contents(context, &args[0], "read()", line)?))
}

/// Returns the lines of a file as a list of strings, without line endings.
pub fn read_lines(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let contents = read_contents(context, &args[0], "readLine()", line)?;
    Ok(contents.lines().map(Value::from).collect())
}

/// `write(target, data[, mode])`.
///
/// With a path, the file is opened in mode `"w"` (the default) or `"a"`,
/// written and closed again. With a handle, the data goes to the open file
/// and no mode may be given. Non-string data is written in its display
/// form.
pub fn write(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let data = args[1].to_string();

    if let Some(id) = context.files.handle_id(&args[0]) {
        if args.len() == 3 {
            return Err(RuntimeError::InvalidArgument { details: "write() takes no mode when given a file handle".to_string(),
                                                       line });
        }
        context.files.write(id, &data, line)?;
        return Ok(Value::None);
    }

    let path = args[0].as_str("write()", line)?;
    let mode = match args.get(2) {
        Some(mode) => parse_mode(mode, line)?,
        None => FileMode::Write,
    };

    let mut options = OpenOptions::new();
    match mode {
        FileMode::Append => options.create(true).append(true),
        FileMode::Write => options.create(true).write(true).truncate(true),
        FileMode::Read => {
            return Err(RuntimeError::InvalidArgument { details: "write() cannot use mode \"r\"".to_string(),
                                                       line });
        },
    };

    options.open(path)
           .and_then(|mut file| file.write_all(data.as_bytes()))
           .map_err(|e| RuntimeError::Io { details: format!("Cannot write file '{path}': {e}"),
                                           line })?;
    Ok(Value::None)
}

fn parse_mode(mode: &Value, line: usize) -> EvalResult<FileMode> {
    mode.as_str("file mode", line)?
        .parse()
        .map_err(|details| RuntimeError::InvalidArgument { details, line })
}

/// `open(path[, mode])` returns a handle dict. The mode defaults to `"r"`.
pub fn open(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str("open()", line)?;
    let mode = match args.get(1) {
        Some(mode) => parse_mode(mode, line)?,
        None => FileMode::Read,
    };
    context.files.open(path, mode, line)
}

/// `close(handle)` closes an open handle.
pub fn close(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let id = context.files
                    .handle_id(&args[0])
                    .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("close() expects a file handle, got {}",
                                                                                    args[0].type_name()),
                                                                   line })?;
    context.files.close(id, line)?;
    Ok(Value::None)
}
