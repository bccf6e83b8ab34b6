use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::GameError;
use crate::types::{BOARD_SIZE, Candidate, Color, Piece};

const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

type Ray = Vec<(usize, usize)>;

/// For every cell, the cells along each direction, nearest first.
static RAYS: Lazy<Vec<[Ray; 8]>> = Lazy::new(|| {
    (0..NUM_CELLS)
        .map(|idx| {
            let x = (idx / BOARD_SIZE) as i32;
            let y = (idx % BOARD_SIZE) as i32;
            DIRECTIONS.map(|(dx, dy)| {
                let mut ray = Vec::new();
                let (mut cx, mut cy) = (x + dx, y + dy);
                while in_bounds(cx, cy) {
                    ray.push((cx as usize, cy as usize));
                    cx += dx;
                    cy += dy;
                }
                ray
            })
        })
        .collect()
});

/// Reversi grid indexed `[x][y]`, x being the column.
///
/// `Board` is `Copy`: `let mut next = *board;` yields an independent grid,
/// which is how the AI simulates moves without touching the live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Piece; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the opening position:
    /// Light at (3,3) and (4,4), Dark at (3,4) and (4,3).
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// A grid with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Restores the opening position in place.
    pub fn reset(&mut self) {
        self.cells = [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.cells[3][3] = Piece::Light;
        self.cells[4][4] = Piece::Light;
        self.cells[3][4] = Piece::Dark;
        self.cells[4][3] = Piece::Dark;
    }

    pub fn get(&self, x: usize, y: usize) -> Piece {
        self.cells[x][y]
    }

    pub fn set(&mut self, x: usize, y: usize, piece: Piece) {
        self.cells[x][y] = piece;
    }

    /// Returns how many pieces a move at `(x, y)` would turn over.
    /// Zero means the move is illegal. Never mutates the board.
    pub fn check_move(&self, x: usize, y: usize, color: Color) -> u32 {
        if self.cells[x][y] != Piece::Empty {
            return 0;
        }
        let mover = Piece::from(color);
        RAYS[x * BOARD_SIZE + y]
            .iter()
            .map(|ray| self.run_length(ray, mover) as u32)
            .sum()
    }

    /// Places a piece and turns over every anchored run.
    /// Returns the number of pieces turned over; on 0 the board is unchanged.
    pub fn place(&mut self, x: usize, y: usize, color: Color) -> u32 {
        if self.cells[x][y] != Piece::Empty {
            return 0;
        }

        let mover = Piece::from(color);
        let rays = &RAYS[x * BOARD_SIZE + y];
        let runs = rays.each_ref().map(|ray| self.run_length(ray, mover));
        let total: usize = runs.iter().sum();
        if total == 0 {
            return 0;
        }

        for (ray, run) in rays.iter().zip(runs) {
            for &(cx, cy) in &ray[..run] {
                self.cells[cx][cy] = mover;
            }
        }
        self.cells[x][y] = mover;

        total as u32
    }

    /// Enumerates every legal move for `color`.
    ///
    /// The scan runs x outer, y inner, and the result is ordered
    /// last-discovered-first. Tie-breaking in the AI depends on this order.
    pub fn legal_moves(&self, color: Color) -> Vec<Candidate> {
        let mut moves = Vec::new();
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                let score = self.check_move(x, y, color);
                if score > 0 {
                    moves.push(Candidate {
                        x,
                        y,
                        score: score as i32,
                    });
                }
            }
        }
        moves.reverse();
        moves
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| (x, y)))
            .any(|(x, y)| self.check_move(x, y, color) > 0)
    }

    /// Returns `(light_count, dark_count)`.
    pub fn count(&self) -> (u8, u8) {
        let mut light = 0u8;
        let mut dark = 0u8;
        for piece in self.cells.iter().flatten() {
            match piece {
                Piece::Light => light += 1,
                Piece::Dark => dark += 1,
                Piece::Empty => {}
            }
        }
        (light, dark)
    }

    pub fn empty_count(&self) -> u8 {
        let (light, dark) = self.count();
        NUM_CELLS as u8 - light - dark
    }

    /// Converts board to row-major `[u8; 64]` where 0=empty, 1=light, 2=dark.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut out = [0u8; NUM_CELLS];
        for (idx, cell) in out.iter_mut().enumerate() {
            let (x, y) = (idx % BOARD_SIZE, idx / BOARD_SIZE);
            *cell = match self.cells[x][y] {
                Piece::Empty => 0,
                Piece::Light => 1,
                Piece::Dark => 2,
            };
        }
        out
    }

    /// Counts the opponent run starting next to the target along `ray`.
    /// A run only counts when an own piece closes it before an empty cell
    /// or the edge.
    fn run_length(&self, ray: &[(usize, usize)], mover: Piece) -> usize {
        for (len, &(cx, cy)) in ray.iter().enumerate() {
            let piece = self.cells[cx][cy];
            if piece == mover {
                return len;
            }
            if piece == Piece::Empty {
                return 0;
            }
        }
        0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// One row per line, `.` empty, `L` light, `D` dark.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let c = match self.cells[x][y] {
                    Piece::Empty => '.',
                    Piece::Light => 'L',
                    Piece::Dark => 'D',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(GameError::InvalidDiagram {
                message: format!("expected {BOARD_SIZE} rows, got {}", rows.len()),
            });
        }

        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(GameError::InvalidDiagram {
                    message: format!("row {y} has {} cells", cells.len()),
                });
            }
            for (x, c) in cells.into_iter().enumerate() {
                board.cells[x][y] = match c {
                    '.' => Piece::Empty,
                    'L' => Piece::Light,
                    'D' => Piece::Dark,
                    other => {
                        return Err(GameError::InvalidDiagram {
                            message: format!("unexpected character {other:?} in row {y}"),
                        });
                    }
                };
            }
        }
        Ok(board)
    }
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(moves: &[Candidate]) -> Vec<(usize, usize)> {
        moves.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn initial_position_has_two_pieces_each_at_the_center() {
        let board = Board::new();

        assert_eq!(board.get(3, 3), Piece::Light);
        assert_eq!(board.get(4, 4), Piece::Light);
        assert_eq!(board.get(3, 4), Piece::Dark);
        assert_eq!(board.get(4, 3), Piece::Dark);
        assert_eq!(board.count(), (2, 2));
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn reset_restores_opening_after_play() {
        let mut board = Board::new();
        assert_eq!(board.place(2, 4, Color::Light), 1);

        board.reset();

        assert_eq!(board, Board::new());
    }

    #[test]
    fn opening_legal_moves_for_each_color_in_last_discovered_first_order() {
        let board = Board::new();

        let light = board.legal_moves(Color::Light);
        assert_eq!(coords(&light), vec![(5, 3), (4, 2), (3, 5), (2, 4)]);
        assert!(light.iter().all(|c| c.score == 1));

        let dark = board.legal_moves(Color::Dark);
        assert_eq!(coords(&dark), vec![(5, 4), (4, 5), (3, 2), (2, 3)]);
        assert!(dark.iter().all(|c| c.score == 1));
    }

    #[test]
    fn place_flips_opponent_run_and_writes_target() {
        let mut board = Board::new();

        let flips = board.place(2, 4, Color::Light);

        assert_eq!(flips, 1);
        assert_eq!(board.get(2, 4), Piece::Light);
        assert_eq!(board.get(3, 4), Piece::Light);
        assert_eq!(board.count(), (4, 1));
    }

    #[test]
    fn illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(board.place(0, 0, Color::Light), 0);
        assert_eq!(board.place(3, 3, Color::Dark), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn run_without_own_anchor_does_not_flip() {
        let board: Board = "
            .DDD....
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        assert_eq!(board.check_move(0, 0, Color::Light), 0);
        assert_eq!(board.check_move(4, 0, Color::Light), 0);
    }

    #[test]
    fn run_interrupted_by_empty_cell_does_not_flip() {
        let board: Board = "
            .DD.L...
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        assert_eq!(board.check_move(0, 0, Color::Light), 0);
    }

    #[test]
    fn adjacent_own_piece_contributes_nothing() {
        let board: Board = "
            .LD.....
            D.......
            L.......
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        // (1,0) is own colour: east contributes 0, south flips (0,1).
        assert_eq!(board.check_move(0, 0, Color::Light), 1);
    }

    #[test]
    fn multiple_directions_sum_and_all_flip() {
        let mut board: Board = "
            L.L.L...
            .DDD....
            LD.DL...
            .DDD....
            L.L.L...
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        assert_eq!(board.check_move(2, 2, Color::Light), 8);
        assert_eq!(board.place(2, 2, Color::Light), 8);
        assert_eq!(board.count(), (17, 0));
    }

    #[test]
    fn long_run_to_the_edge_anchor_flips_every_cell() {
        let mut board: Board = "
            .DDDDDDL
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        assert_eq!(board.place(0, 0, Color::Light), 6);
        assert!((0..BOARD_SIZE).all(|x| board.get(x, 0) == Piece::Light));
    }

    #[test]
    fn copy_is_independent_of_source() {
        let board = Board::new();
        let mut copy = board;

        copy.place(2, 4, Color::Light);

        assert_eq!(board, Board::new());
        assert_ne!(copy, board);
    }

    #[test]
    fn to_array_is_row_major() {
        let board = Board::new();
        let cells = board.to_array();

        assert_eq!(cells[3 * BOARD_SIZE + 3], 1);
        assert_eq!(cells[4 * BOARD_SIZE + 3], 2);
        assert_eq!(cells[3 * BOARD_SIZE + 4], 2);
        assert_eq!(cells[4 * BOARD_SIZE + 4], 1);
        assert_eq!(cells.iter().filter(|&&c| c == 0).count(), 60);
    }

    #[test]
    fn display_and_parse_agree() {
        let mut board = Board::new();
        board.place(2, 4, Color::Light);

        let text = board.to_string();
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn parse_rejects_malformed_diagrams() {
        assert!(matches!(
            "........".parse::<Board>(),
            Err(GameError::InvalidDiagram { .. })
        ));
        let bad_char = "X.......\n".repeat(8);
        assert!(matches!(
            bad_char.parse::<Board>(),
            Err(GameError::InvalidDiagram { .. })
        ));
    }

    #[test]
    fn full_board_has_no_legal_moves() {
        let board: Board = "LLLLLLLL\n".repeat(8).parse().unwrap();

        assert!(!board.has_legal_move(Color::Light));
        assert!(!board.has_legal_move(Color::Dark));
        assert!(board.legal_moves(Color::Dark).is_empty());
    }
}
