/// Wilson's algorithm spanning-tree carving
pub mod carving;
/// Full generation pipeline and regeneration
pub mod generator;
/// Extra wall removal for non-perfect mazes
pub mod loops;
/// Random-access cell pool shared by the carving and loop passes
pub mod pool;
/// BFS distances and solution reconstruction
pub mod resolver;
