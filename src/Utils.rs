/// rounding, Unicode sub/superscripts and human-readable number formatting shared by the calculators
pub mod numeric;
