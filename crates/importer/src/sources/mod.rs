pub mod aoc;
