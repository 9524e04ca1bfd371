pub(crate) mod ai_guidance;
pub(crate) mod assembler;
pub(crate) mod guidance;
pub(crate) mod scoring;
pub(crate) mod seed;
