/// main menu of the interactive terminal front-end
pub mod cli_main;
/// one submenu per calculator: reads the inputs, runs the calculation, prints the result
pub mod cli_calculations;
