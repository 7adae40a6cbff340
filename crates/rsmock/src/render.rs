//! Mock source rendering: template expansion plus best-effort gofmt.

use crate::model::Model;
use crate::Error;
use serde::Serialize;
use std::io::Write as _;
use std::process::{Command, Stdio};
use tera::{Context, Tera};
use tracing::warn;

const TEMPLATE_NAME: &str = "mock.go";

/// The generated artifact's contract lives in this template: one
/// function-valued field per method, and wrapper methods that panic
/// with a fixed message when their field was never assigned.
const MOCK_TEMPLATE: &str = r#"package {{ package_name }}

import (
{%- for imp in imports %}
	{{ imp }}
{%- endfor %}
)
{% for s in structures %}
type {{ s.name }}Mock struct {
{%- for m in s.methods %}
	{{ m.name }}Func func({{ m.params }}) {{ m.returns }}
{%- endfor %}
}
{% for m in s.methods %}
func (m *{{ s.name }}Mock) {{ m.name }}({{ m.params }}) {{ m.returns }} {
	if m.{{ m.name }}Func == nil {
		panic("This method is not defined.")
	}
{%- if m.has_returns %}
	return m.{{ m.name }}Func({{ m.args }})
{%- else %}
	m.{{ m.name }}Func({{ m.args }})
{%- endif %}
}
{% endfor %}
{%- endfor %}
"#;

#[derive(Serialize)]
struct ModelCtx<'a> {
    package_name: &'a str,
    imports: &'a [String],
    structures: Vec<StructureCtx>,
}

#[derive(Serialize)]
struct StructureCtx {
    name: String,
    methods: Vec<MethodCtx>,
}

#[derive(Serialize)]
struct MethodCtx {
    name: String,
    params: String,
    returns: String,
    args: String,
    has_returns: bool,
}

fn context_of(model: &Model) -> Result<Context, tera::Error> {
    let ctx = ModelCtx {
        package_name: &model.package_name,
        imports: &model.imports,
        structures: model
            .structures
            .iter()
            .map(|s| StructureCtx {
                name: s.name.clone(),
                methods: s
                    .methods
                    .iter()
                    .map(|m| MethodCtx {
                        name: m.name.clone(),
                        params: m.params.to_string(),
                        returns: m.returns.to_string(),
                        args: m.args(),
                        has_returns: !m.returns.is_empty(),
                    })
                    .collect(),
            })
            .collect(),
    };
    Context::from_serialize(ctx)
}

/// Expand the mock template; no formatting applied.
pub fn expand(model: &Model) -> Result<String, Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, MOCK_TEMPLATE)?;
    Ok(tera.render(TEMPLATE_NAME, &context_of(model)?)?)
}

/// Expand the mock template and pipe the result through gofmt.
///
/// Formatting is best-effort: on any failure the unformatted text is
/// emitted with a warning and the run still succeeds.
pub fn render(model: &Model) -> Result<String, Error> {
    let text = expand(model)?;
    match gofmt(&text) {
        Ok(formatted) => Ok(formatted),
        Err(err) => {
            warn!("gofmt failed, emitting unformatted source: {err}");
            warn!("compile the generated package to analyze the error");
            Ok(text)
        }
    }
}

fn gofmt(src: &str) -> std::io::Result<String> {
    let mut child = Command::new("gofmt")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let Some(mut stdin) = child.stdin.take() else {
        return Err(std::io::Error::other("gofmt stdin unavailable"));
    };
    stdin.write_all(src.as_bytes())?;
    drop(stdin);

    let out = child.wait_with_output()?;
    if !out.status.success() {
        return Err(std::io::Error::other(format!(
            "gofmt exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    String::from_utf8(out.stdout).map_err(std::io::Error::other)
}
