//! Token filter implementations for token transformation.
//!
//! Every filter wraps an inner [`TokenStream`](crate::analysis::token_stream::TokenStream)
//! by value and is itself a token stream, so chains compose by nesting:
//!
//! ```
//! use stemma::analysis::token_filter::{LowercaseFilter, StopFilter};
//! use stemma::analysis::token_stream::{collect_tokens, text_input, TokenStream};
//! use stemma::analysis::tokenizer::StandardTokenizer;
//! use stemma::analysis::word_list::DefaultSet;
//!
//! let stop_words = DefaultSet::EnglishStop.load().unwrap();
//! let mut chain = StopFilter::new(LowercaseFilter::new(StandardTokenizer::new()), stop_words);
//! chain.set_input(text_input("The Quick fox")).unwrap();
//! chain.reset().unwrap();
//!
//! let output = collect_tokens(&mut chain).unwrap();
//! assert_eq!(output.terms(), vec!["quick", "fox"]);
//! assert_eq!(output.increments(), vec![2, 1]);
//! ```

pub mod elision;
pub mod filtering;
pub mod keyword_marker;
pub mod length;
pub mod limit;
pub mod lowercase;
pub mod possessive;
pub mod stem;
pub mod stop;

pub use elision::ElisionFilter;
pub use keyword_marker::KeywordMarkerFilter;
pub use length::LengthFilter;
pub use limit::LimitTokenCountFilter;
pub use lowercase::LowercaseFilter;
pub use possessive::EnglishPossessiveFilter;
pub use stem::{FrenchMinimalStemmer, Language, PorterStemmer, SnowballStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
