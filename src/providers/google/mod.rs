//! Google Cloud Text-to-Speech provider.
//!
//! Uses the `text:synthesize` REST method with an API key and `LINEAR16`
//! output (WAV with header). Google voices have no speaking styles, so any
//! style other than `default` is ignored. Rate and pitch percentages are
//! converted to Google's units:
//!
//! | Selection | Request field |
//! |---|---|
//! | rate `+10%` | `speakingRate = 1.1` |
//! | pitch `+10%` | `pitch = 12 * log2(1.1)` semitones |

pub mod provider;

pub use provider::GoogleProvider;
