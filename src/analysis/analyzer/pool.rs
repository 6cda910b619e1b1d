//! Reuse pool of stage chains.
//!
//! Building a chain allocates every stage and its scratch buffers. An indexer
//! analyzing many documents can instead check chains out of a [`ChainPool`]:
//! each checkout rebinds the input and resets the chain, and dropping the
//! guard closes the chain and returns it to the free list of its field.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use ahash::AHashMap;
use log::{trace, warn};
use parking_lot::Mutex;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token_stream::{BoxTokenStream, CharInput, TokenStream};
use crate::error::Result;

/// Per-field free lists of chains built by one analyzer.
///
/// ```
/// use std::sync::Arc;
///
/// use stemma::analysis::analyzer::pool::ChainPool;
/// use stemma::analysis::analyzer::standard::StandardAnalyzer;
/// use stemma::analysis::token_stream::text_input;
/// use stemma::analysis::version::Version;
///
/// let pool = ChainPool::new(Arc::new(StandardAnalyzer::new(Version::LATEST).unwrap()));
///
/// let mut chain = pool.checkout("body", text_input("Hello World")).unwrap();
/// let mut buffer = stemma::analysis::token::TokenBuffer::new();
/// assert!(chain.produce_next(&mut buffer).unwrap());
/// assert_eq!(buffer.term(), "hello");
/// drop(chain);
///
/// assert_eq!(pool.idle("body"), 1);
/// ```
pub struct ChainPool {
    analyzer: Arc<dyn Analyzer>,
    free: Mutex<AHashMap<String, Vec<BoxTokenStream>>>,
}

impl ChainPool {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        ChainPool {
            analyzer,
            free: Mutex::new(AHashMap::new()),
        }
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Take a chain for `field` (reusing an idle one when available), bind
    /// `input` and reset it.
    ///
    /// If binding fails the chain goes back to the free list and the error is
    /// returned.
    pub fn checkout(&self, field: &str, input: CharInput) -> Result<PooledStream<'_>> {
        let idle = self.free.lock().get_mut(field).and_then(Vec::pop);
        let mut stream = match idle {
            Some(stream) => {
                trace!("reusing pooled chain for field '{field}'");
                stream
            }
            None => {
                trace!("building new chain for field '{field}'");
                self.analyzer.create_stream(field)?
            }
        };
        let bound = stream.set_input(input).and_then(|()| stream.reset());
        if let Err(e) = bound {
            self.give_back(field.to_string(), stream);
            return Err(e);
        }
        Ok(PooledStream {
            pool: self,
            field: field.to_string(),
            stream: Some(stream),
        })
    }

    /// Number of idle chains held for `field`.
    pub fn idle(&self, field: &str) -> usize {
        self.free.lock().get(field).map_or(0, Vec::len)
    }

    /// Drop every idle chain.
    pub fn clear(&self) {
        self.free.lock().clear();
    }

    fn give_back(&self, field: String, mut stream: BoxTokenStream) {
        if let Err(e) = stream.close() {
            warn!("discarding chain for field '{field}' that failed to close: {e}");
            return;
        }
        trace!("returning chain for field '{field}' to the pool");
        self.free.lock().entry(field).or_default().push(stream);
    }
}

impl fmt::Debug for ChainPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let free = self.free.lock();
        let mut idle: Vec<_> = free.iter().map(|(field, list)| (field.clone(), list.len())).collect();
        idle.sort_unstable();
        f.debug_struct("ChainPool")
            .field("analyzer", &self.analyzer.name())
            .field("idle", &idle)
            .finish()
    }
}

/// A chain checked out of a [`ChainPool`]; returned to it on drop.
pub struct PooledStream<'a> {
    pool: &'a ChainPool,
    field: String,
    stream: Option<BoxTokenStream>,
}

impl PooledStream<'_> {
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Deref for PooledStream<'_> {
    type Target = BoxTokenStream;

    fn deref(&self) -> &BoxTokenStream {
        // only taken in drop
        self.stream.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl DerefMut for PooledStream<'_> {
    fn deref_mut(&mut self) -> &mut BoxTokenStream {
        self.stream.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl Drop for PooledStream<'_> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.pool.give_back(std::mem::take(&mut self.field), stream);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::language::english::EnglishAnalyzer;
    use crate::analysis::analyzer::standard::StandardAnalyzer;
    use crate::analysis::token::TokenBuffer;
    use crate::analysis::token_stream::{collect_tokens, text_input};
    use crate::analysis::version::Version;

    fn pool() -> ChainPool {
        ChainPool::new(Arc::new(EnglishAnalyzer::new(Version::LATEST).unwrap()))
    }

    #[test]
    fn test_checkout_reuses_chain() {
        let pool = pool();
        {
            let mut chain = pool.checkout("body", text_input("running dogs")).unwrap();
            assert_eq!(collect_tokens(&mut *chain).unwrap().terms(), vec!["run", "dog"]);
        }
        assert_eq!(pool.idle("body"), 1);

        let mut chain = pool.checkout("body", text_input("jumping cats")).unwrap();
        assert_eq!(pool.idle("body"), 0);
        assert_eq!(collect_tokens(&mut *chain).unwrap().terms(), vec!["jump", "cat"]);
    }

    #[test]
    fn test_abandoned_run_is_reset_on_checkout() {
        let pool = pool();
        {
            let mut chain = pool.checkout("body", text_input("alpha beta gamma")).unwrap();
            let mut buffer = TokenBuffer::new();
            assert!(chain.produce_next(&mut buffer).unwrap());
        }

        let mut chain = pool.checkout("body", text_input("delta")).unwrap();
        let output = collect_tokens(&mut *chain).unwrap();
        assert_eq!(output.terms(), vec!["delta"]);
        assert_eq!(output.final_offset, 5);
    }

    #[test]
    fn test_failed_checkout_keeps_chain() {
        let pool = pool();
        drop(pool.checkout("body", text_input("warm up")).unwrap());
        assert_eq!(pool.idle("body"), 1);

        let invalid: CharInput = Box::new(std::io::Cursor::new(vec![0x66, 0xFF, 0x6F]));
        let err = pool.checkout("body", invalid).err().unwrap();
        assert!(matches!(err, crate::error::StemmaError::Io(_)));
        assert_eq!(pool.idle("body"), 1);

        let mut chain = pool.checkout("body", text_input("running dogs")).unwrap();
        assert_eq!(pool.idle("body"), 0);
        assert_eq!(collect_tokens(&mut *chain).unwrap().terms(), vec!["run", "dog"]);
    }

    #[test]
    fn test_free_lists_are_per_field() {
        let pool = ChainPool::new(Arc::new(StandardAnalyzer::new(Version::LATEST).unwrap()));
        let a = pool.checkout("title", text_input("a")).unwrap();
        let b = pool.checkout("title", text_input("b")).unwrap();
        let c = pool.checkout("body", text_input("c")).unwrap();
        assert_eq!(a.field(), "title");
        drop((a, b, c));

        assert_eq!(pool.idle("title"), 2);
        assert_eq!(pool.idle("body"), 1);
        assert_eq!(pool.idle("other"), 0);

        pool.clear();
        assert_eq!(pool.idle("title"), 0);
    }

    #[test]
    fn test_pool_is_shared_across_threads() {
        let pool = Arc::new(pool());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        let mut chain = pool.checkout("body", text_input("jumping cats")).unwrap();
                        let terms = collect_tokens(&mut *chain).unwrap().terms().join(" ");
                        assert_eq!(terms, "jump cat");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(pool.idle("body") >= 1);
    }
}
