//! Line-oriented bridge for a front end: one JSON request per stdin line,
//! one JSON response per stdout line. Logs go to stderr.
//!
//! ```text
//! {"op":"encode","chain":["caesar","reverse"],"text":"ab"}  ->  {"ok":true,"result":"ed"}
//! {"op":"learn","name":"velo","original":"love","encoded":"velo"}
//! {"op":"forget","name":"velo"}
//! {"op":"describe","id":"rot13"}
//! {"op":"list"}
//! {"op":"exit"}
//! ```

use cipher_core::config::EngineConfig;
use cipher_core::logging::init_logging;
use cipher_core::CipherEngine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Request {
    Encode {
        chain: Vec<String>,
        text: String,
    },
    Decode {
        chain: Vec<String>,
        text: String,
    },
    Learn {
        name: String,
        original: String,
        encoded: String,
        #[serde(default)]
        description: Option<String>,
    },
    Forget {
        name: String,
    },
    Describe {
        id: String,
    },
    List,
    Exit,
}

#[derive(Debug, Serialize)]
struct Response {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Response {
    fn ok(result: Value) -> Self {
        Self { ok: true, result: Some(result), error: None }
    }

    fn err(message: impl ToString) -> Self {
        Self { ok: false, result: None, error: Some(message.to_string()) }
    }
}

fn main() -> io::Result<()> {
    init_logging("info");
    info!("cipher bridge starting");

    let config = EngineConfig::load(None).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring configuration");
        EngineConfig::default()
    });
    let mut engine = CipherEngine::with_config(&config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        if input.trim().is_empty() {
            continue;
        }

        let request = match serde_json::from_str::<Request>(&input) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "unreadable request");
                respond(&mut stdout, Response::err(format!("bad request: {}", e)))?;
                continue;
            }
        };

        if matches!(request, Request::Exit) {
            respond(&mut stdout, Response::ok(Value::Null))?;
            break;
        }
        let response = handle_request(&mut engine, request);
        respond(&mut stdout, response)?;
    }

    if let Err(e) = engine.save() {
        error!(error = %e, "could not save ciphers");
    }
    info!("cipher bridge shutting down");
    Ok(())
}

fn handle_request(engine: &mut CipherEngine, request: Request) -> Response {
    match request {
        Request::Encode { chain, text } => match engine.encode(&text, chain.as_slice()) {
            Ok(out) => Response::ok(Value::String(out)),
            Err(e) => Response::err(e),
        },
        Request::Decode { chain, text } => match engine.decode(&text, chain.as_slice()) {
            Ok(out) => Response::ok(Value::String(out)),
            Err(e) => Response::err(e),
        },
        Request::Learn { name, original, encoded, description } => {
            let learned = engine
                .learn_cipher(&name, &original, &encoded, description.as_deref())
                .map(|cipher| cipher.to_record());
            match learned {
                Ok(record) => match persist(engine) {
                    Ok(()) => serde_json::to_value(record).map_or_else(Response::err, Response::ok),
                    Err(e) => Response::err(e),
                },
                Err(e) => Response::err(e),
            }
        }
        Request::Forget { name } => {
            let removed = engine.remove_cipher(&name).is_some();
            if removed {
                if let Err(e) = persist(engine) {
                    return Response::err(e);
                }
            }
            Response::ok(Value::Bool(removed))
        }
        Request::Describe { id } => match engine.describe(&id) {
            Ok(description) => Response::ok(Value::String(description)),
            Err(e) => Response::err(e),
        },
        Request::List => {
            let ciphers: Vec<Value> = engine
                .available()
                .into_iter()
                .map(|id| {
                    let description = engine.describe(&id).unwrap_or_default();
                    json!({ "id": id, "description": description })
                })
                .collect();
            Response::ok(Value::Array(ciphers))
        }
        Request::Exit => Response::ok(Value::Null),
    }
}

fn persist(engine: &CipherEngine) -> Result<(), String> {
    engine.save().map_err(|e| {
        error!(error = %e, "could not save ciphers");
        format!("could not save ciphers: {}", e)
    })
}

fn respond(stdout: &mut io::Stdout, response: Response) -> io::Result<()> {
    let line = serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"ok":false,"error":"could not encode response"}"#.to_string());
    writeln!(stdout, "{}", line)?;
    stdout.flush()
}
