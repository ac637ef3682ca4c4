//! Script glyph table
//!
//! Covers the weekday labels, the default location, the "unknown"
//! placeholder and the common single-character weather descriptions.
//! Anything else renders as a hollow box.

use skyclock_drivers::{GlyphTable, ScriptGlyph};

pub fn script_table() -> GlyphTable {
    GlyphTable::new(&GLYPHS)
}

static GLYPHS: [ScriptGlyph; 17] = [
    ScriptGlyph::from_rows(
        '周',
        [
            "                ",
            " ############## ",
            " #            # ",
            " #     #      # ",
            " #  #######   # ",
            " #     #      # ",
            " # #########  # ",
            " #            # ",
            " #  #######   # ",
            " #  #     #   # ",
            " #  #     #   # ",
            " #  #######   # ",
            "#             # ",
            "#             # ",
            "#           ### ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '日',
        [
            "                ",
            "   ##########   ",
            "   #        #   ",
            "   #        #   ",
            "   #        #   ",
            "   #        #   ",
            "   #        #   ",
            "   ##########   ",
            "   #        #   ",
            "   #        #   ",
            "   #        #   ",
            "   #        #   ",
            "   #        #   ",
            "   ##########   ",
            "   #        #   ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '一',
        [
            "", "", "", "", "", "", "",
            " ############## ",
            "", "", "", "", "", "", "", "",
        ],
    ),
    ScriptGlyph::from_rows(
        '二',
        [
            "", "", "",
            "   ##########   ",
            "", "", "", "", "", "", "", "",
            " ############## ",
            "", "", "",
        ],
    ),
    ScriptGlyph::from_rows(
        '三',
        [
            "", "",
            "  ############  ",
            "", "", "", "",
            "   ##########   ",
            "", "", "", "", "",
            " ############## ",
            "", "",
        ],
    ),
    ScriptGlyph::from_rows(
        '四',
        [
            "                ",
            "                ",
            " ############## ",
            " #    #  #    # ",
            " #    #  #    # ",
            " #    #  #    # ",
            " #    #  #    # ",
            " #   #   #    # ",
            " #   #   #    # ",
            " #  #     #   # ",
            " # #       ## # ",
            " ##           # ",
            " #            # ",
            " ############## ",
            " #            # ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '五',
        [
            "                ",
            " ############## ",
            "      #         ",
            "      #         ",
            "      #         ",
            "      #         ",
            "  ##########    ",
            "     #     #    ",
            "     #     #    ",
            "     #     #    ",
            "    #      #    ",
            "    #      #    ",
            "    #      #    ",
            "################",
            "                ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '六',
        [
            "       #        ",
            "        #       ",
            "        #       ",
            " ############## ",
            "                ",
            "                ",
            "     #   #      ",
            "     #    #     ",
            "    #      #    ",
            "    #      #    ",
            "   #        #   ",
            "   #         #  ",
            "  #          #  ",
            " #            # ",
            "                ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '未',
        [
            "       #        ",
            "       #        ",
            "  ###########   ",
            "       #        ",
            "       #        ",
            " ############## ",
            "      ###       ",
            "     # # #      ",
            "     # # #      ",
            "    #  #  #     ",
            "   #   #   #    ",
            "  #    #    #   ",
            " #     #     ## ",
            "       #        ",
            "       #        ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '知',
        [
            "  #             ",
            "  #             ",
            "  #####  ###### ",
            " #  #    #    # ",
            "#   #    #    # ",
            " ######  #    # ",
            "    #    #    # ",
            "    #    #    # ",
            "########## #  # ",
            "    #    #    # ",
            "   # #   #    # ",
            "   #  #  #    # ",
            "  #    # ###### ",
            " #     # #    # ",
            "#              #",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '杭',
        [
            "   #      #     ",
            "   #       #    ",
            "   #   ######## ",
            "####### #       ",
            "   #            ",
            "  ###   ######  ",
            "  # #   #    #  ",
            " #  ##  #    #  ",
            " #  #   #    #  ",
            "#   #   #    #  ",
            "    #   #    #  ",
            "    #  #     #  ",
            "    #  #     # #",
            "    # #      # #",
            "    ##        ##",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '州',
        [
            "   #    #    #  ",
            "   #    #    #  ",
            "   #    #    #  ",
            " # # #  #  # #  ",
            " # # #  #  # #  ",
            "#  #  # # #  #  ",
            "   #    #    #  ",
            "   #    #    #  ",
            "   #    #    #  ",
            "   #    #    #  ",
            "  #     #    #  ",
            "  #     #    #  ",
            " #     #     #  ",
            " #     #     #  ",
            "#     #      #  ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '晴',
        [
            "          #     ",
            "      ########  ",
            "####      #     ",
            "#  #   ######   ",
            "#  #      #     ",
            "#  # ########## ",
            "####            ",
            "#  #   ######   ",
            "#  #   #    #   ",
            "#  #   ######   ",
            "####   #    #   ",
            "#      ######   ",
            "       #    #   ",
            "       #    #   ",
            "       #  ###   ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '云',
        [
            "                ",
            "                ",
            "   ##########   ",
            "                ",
            "                ",
            "                ",
            " ############## ",
            "      #         ",
            "     #          ",
            "     #          ",
            "    #     #     ",
            "   #       #    ",
            "  #         #   ",
            " ############## ",
            "              # ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '雨',
        [
            "                ",
            "################",
            "       #        ",
            "       #        ",
            " ############## ",
            " #     #      # ",
            " #     #      # ",
            " #  #  #  #   # ",
            " #   # #   #  # ",
            " #     #      # ",
            " #  #  #  #   # ",
            " #   # #   #  # ",
            " #     #      # ",
            " #     #      # ",
            " #     #    ### ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '阴',
        [
            "                ",
            "####   ######## ",
            "#  #   #      # ",
            "# #    #      # ",
            "##     #      # ",
            "# #    ######## ",
            "#  #   #      # ",
            "#   #  #      # ",
            "#   #  #      # ",
            "#  #   ######## ",
            "###    #      # ",
            "#      #      # ",
            "#     #       # ",
            "#     #       # ",
            "#    #      ### ",
            "                ",
        ],
    ),
    ScriptGlyph::from_rows(
        '多',
        [
            "       #        ",
            "      ######    ",
            "     #    #     ",
            "   ## #  #      ",
            "       ##       ",
            "     ##  #      ",
            "   ##    #      ",
            " ##  #######    ",
            "    #     #     ",
            "   ## #  #      ",
            "  #    ##       ",
            "      ## #      ",
            "    ##   #      ",
            "  ##     #      ",
            "##              ",
            "                ",
        ],
    ),
];
