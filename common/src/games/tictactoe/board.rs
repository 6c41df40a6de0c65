use super::types::{Board, Mark, BOARD_SIZE};

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    index < BOARD_SIZE && board[index] == Mark::Empty
}

pub fn first_empty_cell(board: &Board) -> Option<usize> {
    board.iter().position(|&cell| cell == Mark::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::EMPTY_BOARD;

    #[test]
    fn test_available_moves_ascending() {
        let mut board = EMPTY_BOARD;
        board[0] = Mark::Human;
        board[4] = Mark::Ai;
        assert_eq!(get_available_moves(&board), vec![1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(first_empty_cell(&board), Some(1));
    }

    #[test]
    fn test_is_valid_move_rejects_occupied_and_out_of_range() {
        let mut board = EMPTY_BOARD;
        board[3] = Mark::Human;
        assert!(is_valid_move(&board, 0));
        assert!(!is_valid_move(&board, 3));
        assert!(!is_valid_move(&board, 9));
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = [Mark::Human; BOARD_SIZE];
        assert!(get_available_moves(&board).is_empty());
        assert_eq!(first_empty_cell(&board), None);
    }
}
