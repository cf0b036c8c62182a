//! Maze layouts, one string per tile row
//!
//! Legend: `#` wall, `.` pellet, `o` energizer, `T` tunnel, space for an
//! empty walkable tile. Rows 0-2 and 34-35 are outside the playfield.

/// The Pac-Man maze
pub const PACMAN_MAZE: [&str; 36] = [
    "############################",
    "############################",
    "############################",
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###  ### ##.#     ",
    "######.## #      # ##.######",
    "TTTTTT.   #      #   .TTTTTT",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
    "############################",
    "############################",
];

/// Ms. Pac-Man maze 1 (pink)
pub const MS_PACMAN_MAZE_1: [&str; 36] = [
    "############################",
    "############################",
    "############################",
    "############################",
    "#......##..........##......#",
    "#o####.##.########.##.####o#",
    "#.####.##.########.##.####.#",
    "#..........................#",
    "###.##.#####.##.#####.##.###",
    "  #.##.#####.##.#####.##.#  ",
    "###.##.#####.##.#####.##.###",
    "TTT.##.......##.......##.TTT",
    "###.##### ######## #####.###",
    "  #.##### ######## #####.#  ",
    "  #.                    .#  ",
    "  #.##### ###  ### #####.#  ",
    "  #.##### #      # #####.#  ",
    "  #.##    #      #    ##.#  ",
    "  #.## ## #      # ## ##.#  ",
    "###.## ## ######## ## ##.###",
    "TTT.   ##          ##   .TTT",
    "###.######## ## ########.###",
    "  #.######## ## ########.#  ",
    "  #.......   ##   .......#  ",
    "  #.#####.########.#####.#  ",
    "###.#####.########.#####.###",
    "#............  ............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#.####.##....##....##.####.#",
    "#o####.##.########.##.####o#",
    "#.####.##.########.##.####.#",
    "#..........................#",
    "############################",
    "############################",
    "############################",
];

/// Ms. Pac-Man maze 2 (light blue)
pub const MS_PACMAN_MAZE_2: [&str; 36] = [
    "############################",
    "############################",
    "############################",
    "############################",
    "TTTTTT ##..........## TTTTTT",
    "###### ##.########.## ######",
    "###### ##.########.## ######",
    "#o...........##...........o#",
    "#.#######.##.##.##.#######.#",
    "#.#######.##.##.##.#######.#",
    "#.##......##.##.##......##.#",
    "#.##.#### ##....## ####.##.#",
    "#.##.#### ######## ####.##.#",
    "#......## ######## ##......#",
    "######.##          ##.######",
    "######.## ###  ### ##.######",
    "#......## #      # ##......#",
    "#.####.## #      # ##.####.#",
    "#.####.   #      #   .####.#",
    "#...##.## ######## ##.##...#",
    "###.##.##          ##.##.###",
    "  #.##.#### #### ####.##.#  ",
    "  #.##.#### #### ####.##.#  ",
    "  #.........####.........#  ",
    "  #.#######.####.#######.#  ",
    "###.#######.####.#######.###",
    "TTT....##...    ...##....TTT",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#o..##.......##.......##..o#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "############################",
    "############################",
    "############################",
];

/// Ms. Pac-Man maze 3 (orange)
pub const MS_PACMAN_MAZE_3: [&str; 36] = [
    "############################",
    "############################",
    "############################",
    "############################",
    "#.........##....##.........#",
    "#.#######.##.##.##.#######.#",
    "#o#######.##.##.##.#######o#",
    "#.##.........##.........##.#",
    "#.##.##.####.##.####.##.##.#",
    "#....##.####.##.####.##....#",
    "####.##.####.##.####.##.####",
    "####.##..............##.####",
    "T....#### ######## ####....T",
    "#.## #### ######## #### ##.#",
    "#.##                    ##.#",
    "#.#### ## ###  ### ## ####.#",
    "#.#### ## #      # ## ####.#",
    "#.     ## #      # ##     .#",
    "#.## #### #      # #### ##.#",
    "#.## #### ######## #### ##.#",
    "#.##                    ##.#",
    "#.#### ##### ## ##### ####.#",
    "#.#### ##### ## ##### ####.#",
    "#......##....##....##......#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#o..##.......  .......##..o#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#......##....##....##......#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##..........##......#",
    "############################",
    "############################",
    "############################",
];

/// Ms. Pac-Man maze 4 (dark blue)
pub const MS_PACMAN_MAZE_4: [&str; 36] = [
    "############################",
    "############################",
    "############################",
    "############################",
    "#..........................#",
    "#.##.####.########.####.##.#",
    "#o##.####.########.####.##o#",
    "#.##.####.##....##.####.##.#",
    "#.##......##.##.##......##.#",
    "#.####.##.##.##.##.##.####.#",
    "#.####.##.##.##.##.##.####.#",
    "#......##....##....##......#",
    "###.######## ## ########.###",
    "  #.######## ## ########.#  ",
    "  #....##          ##....#  ",
    "### ##.## ###  ### ##.## ###",
    "TTT ##.## #      # ##.## TTT",
    "######.   #      #   .######",
    "######.## #      # ##.######",
    "TTT ##.## ######## ##.## TTT",
    "### ##.##          ##.## ###",
    "  #....##### ## #####....#  ",
    "  #.##.##### ## #####.##.#  ",
    "  #.##....   ##   ....##.#  ",
    "  #.#####.## ## ##.#####.#  ",
    "###.#####.## ## ##.#####.###",
    "#.........##    ##.........#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#.##...##..........##...##.#",
    "#o##.#######.##.#######.##o#",
    "#.##.#######.##.#######.##.#",
    "#............##............#",
    "############################",
    "############################",
    "############################",
];

/// Tiles where hunting ghosts may not turn upwards (Pac-Man maze only)
pub const PACMAN_UPWARD_BLOCKED: [(i32, i32); 4] = [(12, 14), (15, 14), (12, 26), (15, 26)];

/// Layout of a Ms. Pac-Man maze by its number (1..=4)
pub fn ms_pacman_maze(number: u32) -> &'static [&'static str; 36] {
    match number {
        1 => &MS_PACMAN_MAZE_1,
        2 => &MS_PACMAN_MAZE_2,
        3 => &MS_PACMAN_MAZE_3,
        4 => &MS_PACMAN_MAZE_4,
        _ => panic!("Illegal Ms. Pac-Man maze number: {number}"),
    }
}
