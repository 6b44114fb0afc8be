#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod backend;
pub mod config;
pub mod coordinates; // Layout and surface coordinate types
pub mod error;
pub mod font;
pub mod layout;
pub mod session;
pub mod surface;
pub mod timing;
pub mod token_store;
pub mod tokenizer;

// Re-export core types
pub use backend::{BackendKind, HeuristicMeasure, TextDraw, TextMeasure};
pub use coordinates::{LayoutPos, LayoutRect, LayoutSize};
pub use error::{Error, Result};
pub use font::LoadedFont;
pub use layout::{layout_tokens, measure_tokens, LayoutParams, LayoutStats, LINE_SPACING};
pub use session::{build_layout, RenderSession, SessionOptions, TextLayout};
pub use surface::Surface;
pub use timing::{Harness, Operation, TimingReport, TimingSamples};
pub use token_store::{Token, TokenStore};
pub use tokenizer::{normalize_newlines, tokenize, TokenKind, Tokens};
