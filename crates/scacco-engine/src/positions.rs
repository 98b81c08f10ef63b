//! Built-in benchmark positions for the timing harness and tests.

/// Standard starting position.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Named `(name, fen)` pairs, indexable from the timing CLI.
///
/// The list mixes forced-mate studies (cheap trees with sharp cutoffs) with
/// open middlegame positions (wide trees that actually exercise the worker
/// pools).
pub const BENCH_POSITIONS: &[(&str, &str)] = &[
    ("starting position", STARTPOS),
    ("rook mate in one", "1k6/6R1/1K6/8/8/8/8/8 w - - 0 1"),
    ("rook mate in one, black", "8/8/8/8/8/1k6/6r1/1K6 b - - 0 1"),
    ("crowded mate in one", "1Bb3BN/R2Pk2r/1Q5B/4q2R/2bN4/4Q1BK/1p6/1bq1R1rb w - - 0 1"),
    ("queen and rook mate in two", "5Q2/p1r5/6K1/R7/6k1/P7/8/8 w - - 0 1"),
    ("kiwipete middlegame", "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
    ("open sicilian", "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"),
];
