use super::cli_calculations::{
    composition_menu, conversion_menu, element_search_menu, empirical_menu, molar_mass_menu,
    molecular_menu,
};
use crate::Stoichiometry::periodic_table::PeriodicTable;
use std::io::{self, Write};

pub fn run_interactive_menu(table: &PeriodicTable) {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            println!("Goodbye!");
            break;
        };

        match choice.trim() {
            "1" => molar_mass_menu(table),
            "2" => composition_menu(table),
            "3" => conversion_menu(table),
            "4" => empirical_menu(table),
            "5" => molecular_menu(table),
            "6" => element_search_menu(table),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Red (\x1b[31m) - error messages

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to StoichCalc: chemical formulas, molar masses and stoichiometry \n\x1b[0m"
    );
    println!("\x1b[33m1. Molar mass\x1b[0m");
    println!("\x1b[33m2. Percent composition\x1b[0m");
    println!("\x1b[33m3. Moles / grams / particles conversion\x1b[0m");
    println!("\x1b[33m4. Empirical formula from percentages\x1b[0m");
    println!("\x1b[33m5. Molecular formula from empirical formula\x1b[0m");
    println!("\x1b[33m6. Element search\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

pub(crate) fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

pub(crate) fn print_error(message: &str) {
    println!("\x1b[31mError: {}\x1b[0m", message);
}

/// one line from stdin, `None` on end of input or a read error
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}
