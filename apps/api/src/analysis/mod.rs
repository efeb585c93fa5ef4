// Resume analysis: experience matching, lexical similarity and score combination.
// The pipeline is a pure function of (text, requirements); handlers own the I/O.

pub mod combiner;
pub mod experience;
pub mod handlers;
pub mod pipeline;
pub mod requirements;
pub mod similarity;
