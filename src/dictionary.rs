//! The three fixed-order capability dictionaries (C1).
//!
//! Transcribed verbatim, in historical order, from the legacy ncurses
//! terminfo tables (`gFlags`/`gNumbers`/`gStrings` in the original `rtic`
//! source). A name's position in its array *is* its binary index; the
//! order here must never change.

use std::collections::HashMap;
use std::sync::OnceLock;

/// A capability's kind: boolean flag, integer, or byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapKind {
    Flag,
    Number,
    String,
}

pub static BOOL_CAPS: &[&str] = &[
    "bw", // cub1 wraps from column 0 to last column
    "am", // terminal has automatic margins
    "xsb", // beehive (f1=escape, f2=ctrl C)
    "xhp", // standout not erased by overwriting (hp)
    "xenl", // newline ignored after 80 cols (concept)
    "eo", // can erase overstrikes with a blank
    "gn", // generic line type
    "hc", // hardcopy terminal
    "km", // Has a meta key (i.e., sets 8th-bit)
    "hs", // has extra status line
    "in", // insert mode distinguishes nulls
    "da", // display may be retained above the screen
    "db", // display may be retained below the screen
    "mir", // safe to move while in insert mode
    "msgr", // safe to move while in standout mode
    "os", // terminal can overstrike
    "eslok", // escape can be used on the status line
    "xt", // tabs destructive, magic so char (t1061)
    "hz", // cannot print ~'s (hazeltine)
    "ul", // underline character overstrikes
    "xon", // terminal uses xon/xoff handshaking
    "nxon", // padding will not work, xon/xoff required
    "mc5i", // printer will not echo on screen
    "chts", // cursor is hard to see
    "nrrmc", // smcup does not reverse rmcup
    "npc", // pad character does not exist
    "ndscr", // scrolling region is non-destructive
    "ccc", // terminal can re-define existing colors
    "bce", // screen erased with background color
    "hls", // terminal uses only HLS color notation (Tektronix)
    "xhpa", // only positive motion for hpa/mhpa caps
    "crxm", // using cr turns off micro mode
    "daisy", // printer needs operator to change character set
    "xvpa", // only positive motion for vpa/mvpa caps
    "sam", // printing in last column causes cr
    "cpix", // changing character pitch changes resolution
    "lpix", // changing line pitch changes resolution
    "OTbs", // uses ^H to move left
    "OTns", // crt cannot scroll
    "OTnc", // no way to go to start of line
    "OTMT", // has meta key
    "OTNL", // move down with \n
    "OTpt", // has 8-char tabs invoked with ^I
    "OTxr", // return clears the line
];

pub static NUM_CAPS: &[&str] = &[
    "cols", // number of columns in a line
    "it", // tabs initially every # spaces
    "lines", // number of lines on screen or page
    "lm", // lines of memory if > line. 0 means varies
    "xmc", // number of blank characters left by smso or rmso
    "pb", // lowest baud rate where padding needed
    "vt", // virtual terminal number (CB/unix)
    "wsl", // number of columns in status line
    "nlab", // number of labels on screen
    "lh", // rows in each label
    "lw", // columns in each label
    "ma", // maximum combined attributes terminal can handle
    "wnum", // maximum number of defineable windows
    "colors", // maximum number of colors on screen
    "pairs", // maximum number of color-pairs on the screen
    "ncv", // video attributes that cannot be used with colors
    "bufsz", // numbers of bytes buffered before printing
    "spinv", // spacing of pins vertically in pins per inch
    "spinh", // spacing of dots horizontally in dots per inch
    "maddr", // maximum value in micro_..._address
    "mjump", // maximum value in parm_..._micro
    "mcs", // character step size when in micro mode
    "mls", // line step size when in micro mode
    "npins", // numbers of pins in print-head
    "orc", // horizontal resolution in units per line
    "orl", // vertical resolution in units per line
    "orhi", // horizontal resolution in units per inch
    "orvi", // vertical resolution in units per inch
    "cps", // print rate in characters per second
    "widcs", // character step size when in double wide mode
    "btns", // number of buttons on mouse
    "bitwin", // number of passes for each bit-image row
    "bitype", // type of bit-image device
    "OTug", // number of blanks left by ul
    "OTdC", // pad needed for CR
    "OTdN", // pad needed for LF
    "OTdB", // padding required for ^H
    "OTdT", // padding required for ^I
    "OTkn", // count of function keys
];

pub static STR_CAPS: &[&str] = &[
    "cbt", // back tab (P)
    "bel", // audible signal (bell) (P)
    "cr", // carriage return (P*) (P*)
    "csr", // change region to line #1 to line #2 (P)
    "tbc", // clear all tab stops (P)
    "clear", // clear screen and home cursor (P*)
    "el", // clear to end of line (P)
    "ed", // clear to end of screen (P*)
    "hpa", // horizontal position #1, absolute (P)
    "cmdch", // terminal settable cmd character in prototype !?
    "cup", // move to row #1 columns #2
    "cud1", // down one line
    "home", // home cursor (if no cup)
    "civis", // make cursor invisible
    "cub1", // move left one space
    "mrcup", // memory relative cursor addressing, move to row #1 columns #2
    "cnorm", // make cursor appear normal (undo civis/cvvis)
    "cuf1", // non-destructive space (move right one space)
    "ll", // last line, first column (if no cup)
    "cuu1", // up one line
    "cvvis", // make cursor very visible
    "dch1", // delete character (P*)
    "dl1", // delete line (P*)
    "dsl", // disable status line
    "hd", // half a line down
    "smacs", // start alternate character set (P)
    "blink", // turn on blinking
    "bold", // turn on bold (extra bright) mode
    "smcup", // string to start programs using cup
    "smdc", // enter delete mode
    "dim", // turn on half-bright mode
    "smir", // enter insert mode
    "invis", // turn on blank mode (characters invisible)
    "prot", // turn on protected mode
    "rev", // turn on reverse video mode
    "smso", // begin standout mode
    "smul", // begin underline mode
    "ech", // erase #1 characters (P)
    "rmacs", // end alternate character set (P)
    "sgr0", // turn off all attributes
    "rmcup", // strings to end programs using cup
    "rmdc", // end delete mode
    "rmir", // exit insert mode
    "rmso", // exit standout mode
    "rmul", // exit underline mode
    "flash", // visible bell (may not move cursor)
    "ff", // hardcopy terminal page eject (P*)
    "fsl", // return from status line
    "is1", // initialization string
    "is2", // initialization string
    "is3", // initialization string
    "if", // name of initialization file
    "ich1", // insert character (P)
    "il1", // insert line (P*)
    "ip", // insert padding after inserted character
    "kbs", // backspace key
    "ktbc", // clear-all-tabs key
    "kclr", // clear-screen or erase key
    "kctab", // clear-tab key
    "kdch1", // delete-character key
    "kdl1", // delete-line key
    "kcud1", // down-arrow key
    "krmir", // sent by rmir or smir in insert mode
    "kel", // clear-to-end-of-line key
    "ked", // clear-to-end-of-screen key
    "kf0", // F0 function key
    "kf1", // F1 function key
    "kf10", // F10 function key
    "kf2", // F2 function key
    "kf3", // F3 function key
    "kf4", // F4 function key
    "kf5", // F5 function key
    "kf6", // F6 function key
    "kf7", // F7 function key
    "kf8", // F8 function key
    "kf9", // F9 function key
    "khome", // home key
    "kich1", // insert-character key
    "kil1", // insert-line key
    "kcub1", // left-arrow key
    "kll", // lower-left key (home down)
    "knp", // next-page key
    "kpp", // previous-page key
    "kcuf1", // right-arrow key
    "kind", // scroll-forward key
    "kri", // scroll-backward key
    "khts", // set-tab key
    "kcuu1", // up-arrow key
    "rmkx", // leave 'keyboard_transmit' mode
    "smkx", // enter 'keyboard_transmit' mode
    "lf0", // label on function key f0 if not f0
    "lf1", // label on function key f1 if not f1
    "lf10", // label on function key f10 if not f10
    "lf2", // label on function key f2 if not f2
    "lf3", // label on function key f3 if not f3
    "lf4", // label on function key f4 if not f4
    "lf5", // label on function key f5 if not f5
    "lf6", // label on function key f6 if not f6
    "lf7", // label on function key f7 if not f7
    "lf8", // label on function key f8 if not f8
    "lf9", // label on function key f9 if not f9
    "rmm", // turn off meta mode
    "smm", // turn on meta mode (8th-bit on)
    "nel", // newline (behave like cr followed by lf)
    "pad", // padding char (instead of null)
    "dch", // delete #1 characters (P*)
    "dl", // delete #1 lines (P*)
    "cud", // down #1 lines (P*)
    "ich", // insert #1 characters (P*)
    "indn", // scroll forward #1 lines (P)
    "il", // insert #1 lines (P*)
    "cub", // move #1 characters to the left (P)
    "cuf", // move #1 characters to the right (P*)
    "rin", // scroll back #1 lines (P)
    "cuu", // up #1 lines (P*)
    "pfkey", // program function key #1 to type string #2
    "pfloc", // program function key #1 to execute string #2
    "pfx", // program function key #1 to transmit string #2
    "mc0", // print contents of screen
    "mc4", // turn off printer
    "mc5", // turn on printer
    "rep", // repeat char #1 #2 times (P*)
    "rs1", // reset string
    "rs2", // reset string
    "rs3", // reset string
    "rf", // name of reset file
    "rc", // restore cursor to position of last save_cursor
    "vpa", // vertical position #1 absolute (P)
    "sc", // save current cursor position (P)
    "ind", // scroll text up (P)
    "ri", // scroll text down (P)
    "sgr", // define video attributes #1-#9 (PG9)
    "hts", // set a tab in every row, current columns
    "wind", // current window is lines #1-#2 cols #3-#4
    "ht", // tab to next 8-space hardware tab stop
    "tsl", // move to status line, column #1
    "uc", // underline char and move past it
    "hu", // half a line up
    "iprog", // path name of program for initialization
    "ka1", // upper left of keypad
    "ka3", // upper right of keypad
    "kb2", // center of keypad
    "kc1", // lower left of keypad
    "kc3", // lower right of keypad
    "mc5p", // turn on printer for #1 bytes
    "rmp", // like ip but when in insert mode
    "acsc", // graphics charset pairs, based on vt100
    "pln", // program label #1 to show string #2
    "kcbt", // back-tab key
    "smxon", // turn on xon/xoff handshaking
    "rmxon", // turn off xon/xoff handshaking
    "smam", // turn on automatic margins
    "rmam", // turn off automatic margins
    "xonc", // XON character
    "xoffc", // XOFF character
    "enacs", // enable alternate char set
    "smln", // turn on soft labels
    "rmln", // turn off soft labels
    "kbeg", // begin key
    "kcan", // cancel key
    "kclo", // close key
    "kcmd", // command key
    "kcpy", // copy key
    "kcrt", // create key
    "kend", // end key
    "kent", // enter/send key
    "kext", // exit key
    "kfnd", // find key
    "khlp", // help key
    "kmrk", // mark key
    "kmsg", // message key
    "kmov", // move key
    "knxt", // next key
    "kopn", // open key
    "kopt", // options key
    "kprv", // previous key
    "kprt", // print key
    "krdo", // redo key
    "kref", // reference key
    "krfr", // refresh key
    "krpl", // replace key
    "krst", // restart key
    "kres", // resume key
    "ksav", // save key
    "kspd", // suspend key
    "kund", // undo key
    "kBEG", // shifted begin key
    "kCAN", // shifted cancel key
    "kCMD", // shifted command key
    "kCPY", // shifted copy key
    "kCRT", // shifted create key
    "kDC", // shifted delete-character key
    "kDL", // shifted delete-line key
    "kslt", // select key
    "kEND", // shifted end key
    "kEOL", // shifted clear-to-end-of-line key
    "kEXT", // shifted exit key
    "kFND", // shifted find key
    "kHLP", // shifted help key
    "kHOM", // shifted home key
    "kIC", // shifted insert-character key
    "kLFT", // shifted left-arrow key
    "kMSG", // shifted message key
    "kMOV", // shifted move key
    "kNXT", // shifted next key
    "kOPT", // shifted options key
    "kPRV", // shifted previous key
    "kPRT", // shifted print key
    "kRDO", // shifted redo key
    "kRPL", // shifted replace key
    "kRIT", // shifted right-arrow key
    "kRES", // shifted resume key
    "kSAV", // shifted save key
    "kSPD", // shifted suspend key
    "kUND", // shifted undo key
    "rfi", // send next input char (for ptys)
    "kf11", // F11 function key
    "kf12", // F12 function key
    "kf13", // F13 function key
    "kf14", // F14 function key
    "kf15", // F15 function key
    "kf16", // F16 function key
    "kf17", // F17 function key
    "kf18", // F18 function key
    "kf19", // F19 function key
    "kf20", // F20 function key
    "kf21", // F21 function key
    "kf22", // F22 function key
    "kf23", // F23 function key
    "kf24", // F24 function key
    "kf25", // F25 function key
    "kf26", // F26 function key
    "kf27", // F27 function key
    "kf28", // F28 function key
    "kf29", // F29 function key
    "kf30", // F30 function key
    "kf31", // F31 function key
    "kf32", // F32 function key
    "kf33", // F33 function key
    "kf34", // F34 function key
    "kf35", // F35 function key
    "kf36", // F36 function key
    "kf37", // F37 function key
    "kf38", // F38 function key
    "kf39", // F39 function key
    "kf40", // F40 function key
    "kf41", // F41 function key
    "kf42", // F42 function key
    "kf43", // F43 function key
    "kf44", // F44 function key
    "kf45", // F45 function key
    "kf46", // F46 function key
    "kf47", // F47 function key
    "kf48", // F48 function key
    "kf49", // F49 function key
    "kf50", // F50 function key
    "kf51", // F51 function key
    "kf52", // F52 function key
    "kf53", // F53 function key
    "kf54", // F54 function key
    "kf55", // F55 function key
    "kf56", // F56 function key
    "kf57", // F57 function key
    "kf58", // F58 function key
    "kf59", // F59 function key
    "kf60", // F60 function key
    "kf61", // F61 function key
    "kf62", // F62 function key
    "kf63", // F63 function key
    "el1", // Clear to beginning of line
    "mgc", // clear right and left soft margins
    "smgl", // set left soft margin at current column.
    "smgr", // set right soft margin at current column
    "fln", // label format
    "sclk", // set clock, #1 hrs #2 mins #3 secs
    "dclk", // display clock
    "rmclk", // remove clock
    "cwin", // define a window #1 from #2,#3 to #4,#5
    "wingo", // go to window #1
    "hup", // hang-up phone
    "dial", // dial number #1
    "qdial", // dial number #1 without checking
    "tone", // select touch tone dialing
    "pulse", // select pulse dialing
    "hook", // flash switch hook
    "pause", // pause for 2-3 seconds
    "wait", // wait for dial-tone
    "u0", // User string #0
    "u1", // User string #1
    "u2", // User string #2
    "u3", // User string #3
    "u4", // User string #4
    "u5", // User string #5
    "u6", // User string #6
    "u7", // User string #7
    "u8", // User string #8
    "u9", // User string #9
    "op", // Set default pair to its original value
    "oc", // Set all color pairs to the original ones
    "initc", // initialize color #1 to (#2,#3,#4)
    "initp", // Initialize color pair #1 to fg=(#2,#3,#4), bg=(#5,#6,#7)
    "scp", // Set current color pair to #1
    "setf", // Set foreground color #1
    "setb", // Set background color #1
    "cpi", // Change number of characters per inch to #1
    "lpi", // Change number of lines per inch to #1
    "chr", // Change horizontal resolution to #1
    "cvr", // Change vertical resolution to #1
    "defc", // Define a character #1, #2 dots wide, descender #3
    "swidm", // Enter double-wide mode
    "sdrfq", // Enter draft-quality mode
    "sitm", // Enter italic mode
    "slm", // Start leftward carriage motion
    "smicm", // Start micro-motion mode
    "snlq", // Enter NLQ mode
    "snrmq", // Enter normal-quality mode
    "sshm", // Enter shadow-print mode
    "ssubm", // Enter subscript mode
    "ssupm", // Enter superscript mode
    "sum", // Start upward carriage motion
    "rwidm", // End double-wide mode
    "ritm", // End italic mode
    "rlm", // End left-motion mode
    "rmicm", // End micro-motion mode
    "rshm", // End shadow-print mode
    "rsubm", // End subscript mode
    "rsupm", // End superscript mode
    "rum", // End reverse character motion
    "mhpa", // Like column_address in micro mode
    "mcud1", // Like cursor_down in micro mode
    "mcub1", // Like cursor_left in micro mode
    "mcuf1", // Like cursor_right in micro mode
    "mvpa", // Like row_address #1 in micro mode
    "mcuu1", // Like cursor_up in micro mode
    "porder", // Match software bits to print-head pins
    "mcud", // Like parm_down_cursor in micro mode
    "mcub", // Like parm_left_cursor in micro mode
    "mcuf", // Like parm_right_cursor in micro mode
    "mcuu", // Like parm_up_cursor in micro mode
    "scs", // Select character set, #1
    "smgb", // Set bottom margin at current line
    "smgbp", // Set bottom margin at line #1 or (if smgtp is not given) #2 lines from bottom
    "smglp", // Set left (right) margin at column #1
    "smgrp", // Set right margin at column #1
    "smgt", // Set top margin at current line
    "smgtp", // Set top (bottom) margin at row #1
    "sbim", // Start printing bit image graphics
    "scsd", // Start character set definition #1, with #2 characters in the set
    "rbim", // Stop printing bit image graphics
    "rcsd", // End definition of character set #1
    "subcs", // List of subscriptable characters
    "supcs", // List of superscriptable characters
    "docr", // Printing any of these characters causes CR
    "zerom", // No motion for subsequent character
    "csnm", // Produce #1'th item from list of character set names
    "kmous", // Mouse event has occurred
    "minfo", // Mouse status information
    "reqmp", // Request mouse position
    "getm", // Curses should get button events, parameter #1 not documented.
    "setaf", // Set foreground color to #1, using ANSI escape
    "setab", // Set background color to #1, using ANSI escape
    "pfxl", // Program function key #1 to type string #2 and show string #3
    "devt", // Indicate language/codeset support
    "csin", // Init sequence for multiple codesets
    "s0ds", // Shift to codeset 0 (EUC set 0, ASCII)
    "s1ds", // Shift to codeset 1
    "s2ds", // Shift to codeset 2
    "s3ds", // Shift to codeset 3
    "smglr", // Set both left and right margins to #1, #2.
    "smgtb", // Sets both top and bottom margins to #1, #2
    "birep", // Repeat bit image cell #1 #2 times
    "binel", // Move to next row of the bit image
    "bicr", // Move to beginning of same row
    "colornm", // Give name for color #1
    "defbi", // Define rectangualar bit image region
    "endbi", // End a bit-image region
    "setcolor", // Change to ribbon color #1
    "slines", // Set page length to #1 lines
    "dispc", // Display PC character #1
    "smpch", // Enter PC character display mode
    "rmpch", // Exit PC character display mode
    "smsc", // Enter PC scancode mode
    "rmsc", // Exit PC scancode mode
    "pctrm", // PC terminal options
    "scesc", // Escape for scancode emulation
    "scesa", // Alternate escape for scancode emulation
    "ehhlm", // Enter horizontal highlight mode
    "elhlm", // Enter left highlight mode
    "elohlm", // Enter low highlight mode
    "erhlm", // Enter right highlight mode
    "ethlm", // Enter top highlight mode
    "evhlm", // Enter vertical highlight mode
    "sgr1", // Define second set of video attributes #1-#6
    "slength", // YI Set page length to #1 hundredth of an inch
    "OTi2", // secondary initialization string
    "OTrs", // terminal reset string
    "OTnl", // use to move down
    "OTbc", // move left, if not ^H
    "OTko", // list of self-mapped keycaps
    "OTma", // map arrow keys rogue(1) motion keys
    "OTG2", // single upper left
    "OTG3", // single lower left
    "OTG1", // single upper right
    "OTG4", // single lower right
    "OTGR", // tee pointing right
    "OTGL", // tee pointing left
    "OTGU", // tee pointing up
    "OTGD", // tee pointing down
    "OTGH", // single horizontal line
    "OTGV", // single vertical line
    "OTGC", // single intersection
    "meml", // lock memory above cursor
    "memu", // unlock memory
    "box1", // box characters primary set
];
/// Reverse lookup from capability name to its kind and standard index.
///
/// Built once and cached; the three dictionaries above are small enough
/// (tens to a few hundred entries) that a linear scan would also be fine,
/// but a name is looked up once per capability token, so a map avoids
/// redoing that scan for every line of every entry in a large database.
fn lookup_table() -> &'static HashMap<&'static str, (CapKind, usize)> {
    static TABLE: OnceLock<HashMap<&'static str, (CapKind, usize)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = HashMap::with_capacity(BOOL_CAPS.len() + NUM_CAPS.len() + STR_CAPS.len());
        for (i, name) in BOOL_CAPS.iter().enumerate() {
            map.insert(*name, (CapKind::Flag, i));
        }
        for (i, name) in NUM_CAPS.iter().enumerate() {
            map.insert(*name, (CapKind::Number, i));
        }
        for (i, name) in STR_CAPS.iter().enumerate() {
            map.insert(*name, (CapKind::String, i));
        }
        map
    })
}

/// Look up a capability name in all three dictionaries at once, the way
/// a disabled (`cap@`) token must: the first matching kind wins, in
/// boolean/numeric/string order.
#[must_use]
pub fn lookup(name: &str) -> Option<(CapKind, usize)> {
    lookup_table().get(name).copied()
}

/// Look up a name within a single dictionary, for the non-disabled
/// (flag/number/string) token forms where the kind is already known from
/// the token's syntax (`#`, `=`, or bare).
#[must_use]
pub fn lookup_kind(name: &str, kind: CapKind) -> Option<usize> {
    match lookup(name) {
        Some((found, index)) if found == kind => Some(index),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionaries_have_expected_lengths() {
        assert_eq!(BOOL_CAPS.len(), 44);
        assert_eq!(NUM_CAPS.len(), 39);
        assert_eq!(STR_CAPS.len(), 414);
    }

    #[test]
    fn bool_order_is_preserved() {
        assert_eq!(BOOL_CAPS[0], "bw");
        assert_eq!(BOOL_CAPS[1], "am");
    }

    #[test]
    fn lookup_finds_each_kind() {
        assert_eq!(lookup("am"), Some((CapKind::Flag, 1)));
        assert_eq!(lookup("cols"), Some((CapKind::Number, 0)));
        assert_eq!(lookup("bel"), Some((CapKind::String, 1)));
        assert_eq!(lookup("not_a_cap"), None);
    }

    #[test]
    fn lookup_kind_rejects_cross_kind_matches() {
        // "am" is a boolean; asking for it as a number must miss.
        assert_eq!(lookup_kind("am", CapKind::Number), None);
        assert_eq!(lookup_kind("am", CapKind::Flag), Some(1));
    }
}
