//! The complete scripting command catalogue.
//!
//! Every command callable from scripts has exactly one entry here: its
//! name, its parameter schema, and whether it is a no-op placeholder.
//! Placeholders are callable and argument-checked but change nothing;
//! existing script content may reference them without expecting failure.

use crate::value::ParamKind::{Any, Bool, Class, Climate, Int, List, Num, State, Str, Weather};
use crate::value::{opt, req, Param};

/// One scripting command: name, parameter schema, placeholder flag.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub params: &'static [Param],
    pub noop: bool,
}

impl CommandSpec {
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|param| param.required).count()
    }
}

const fn real(name: &'static str, params: &'static [Param]) -> CommandSpec {
    CommandSpec {
        name,
        params,
        noop: false,
    }
}

const fn stub(name: &'static str, params: &'static [Param]) -> CommandSpec {
    CommandSpec {
        name,
        params,
        noop: true,
    }
}

/// Resolves a command by name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// All commands, in catalogue order.
pub fn all() -> &'static [CommandSpec] {
    COMMANDS
}

static COMMANDS: &[CommandSpec] = &[
    real("abs", &[req("value", Num)]),
    stub("add", &[]),
    stub("addscript", &[req("class", Class), req("id", Int), req("source", Str)]),
    real("addstate", &[req("class", Class), req("id", Int), req("state", State)]),
    real("air", &[req("time", Num)]),
    stub(
        "ai_behavioursignal",
        &[
            req("signal", Str),
            req("behaviour", Int),
            opt("radius", Num),
            opt("class", Class),
            opt("id", Int),
        ],
    ),
    stub("ai_center", &[req("unit", Int)]),
    stub("ai_eater", &[]),
    stub(
        "ai_mode",
        &[
            req("unit", Int),
            req("mode", Str),
            opt("target_class", Class),
            opt("target_id", Int),
        ],
    ),
    stub(
        "ai_signal",
        &[req("signal", Str), opt("radius", Num), opt("class", Class), opt("id", Int)],
    ),
    stub("ai_stay", &[req("unit", Int), opt("mode", Str)]),
    stub(
        "ai_typesignal",
        &[
            req("signal", Str),
            req("type", Int),
            opt("radius", Num),
            opt("class", Class),
            opt("id", Int),
        ],
    ),
    real("alpha", &[req("value", Num), req("class", Class), req("id", Int)]),
    stub(
        "alteritem",
        &[req("amount", Int), req("type", Int), opt("new_amount", Int), opt("new_type", Int)],
    ),
    real("alterobject", &[req("object", Int), req("type", Int)]),
    stub("ambientsfx", &[req("file", Str)]),
    stub(
        "animate",
        &[
            req("unit", Int),
            req("start_frame", Int),
            req("end_frame", Int),
            req("speed", Num),
            opt("mode", Int),
        ],
    ),
    stub(
        "areal_event",
        &[
            req("event", Str),
            req("x", Num),
            req("y", Num),
            req("z", Num),
            opt("radius", Num),
            opt("limit", Int),
        ],
    ),
    stub(
        "areal_state",
        &[req("state", State), req("x", Num), req("y", Num), req("z", Num), opt("radius", Num)],
    ),
    stub("autoload", &[]),
    stub("autosave", &[]),
    stub("behaviour", &[req("class", Class), req("type", Int)]),
    stub("blend", &[req("mode", Int), opt("class", Class), opt("id", Int)]),
    stub("blur", &[req("value", Num)]),
    stub("buffer", &[]),
    stub("buildsetup", &[req("id", Int), opt("camera_height", Num)]),
    stub("builtat", &[req("object", Int)]),
    stub(
        "button",
        &[req("id", Int), req("text", Str), opt("icon", Str), opt("script", Str)],
    ),
    stub("callscript", &[req("server", Str), req("path", Str), opt("execute", Bool)]),
    stub(
        "camfollow",
        &[
            req("time", Num),
            req("class", Class),
            req("id", Int),
            req("x", Num),
            req("y", Num),
            req("z", Num),
        ],
    ),
    stub(
        "cammode",
        &[req("time", Num), req("mode", Int), opt("class", Class), opt("id", Int)],
    ),
    stub("campath", &[req("time", Num), req("step_time", Num), req("ids", List)]),
    stub("clear", &[]),
    real("climate", &[req("climate", Climate)]),
    stub("closemenu", &[]),
    stub(
        "color",
        &[req("red", Num), req("green", Num), req("blue", Num), opt("class", Class), opt("id", Int)],
    ),
    stub(
        "compare_behaviour",
        &[req("class", Class), req("id", Int), req("behaviour", Int)],
    ),
    stub(
        "compare_material",
        &[req("class", Class), req("id", Int), req("material", Int)],
    ),
    real("compass", &[req("show", Bool)]),
    stub("con", &[req("command", Str)]),
    real(
        "consume",
        &[opt("energy", Num), opt("hunger", Num), opt("thirst", Num), opt("exhaustion", Num)],
    ),
    stub(
        "copychildren",
        &[
            req("class", Class),
            req("id", Int),
            opt("variables", Bool),
            opt("items", Bool),
            opt("states", Bool),
            opt("script", Bool),
            opt("add", Bool),
        ],
    ),
    stub(
        "corona",
        &[
            req("x", Num),
            req("z", Num),
            opt("radius", Num),
            opt("red", Num),
            opt("green", Num),
            opt("blue", Num),
            opt("speed", Num),
            opt("unit", Int),
        ],
    ),
    real("cos", &[req("value", Num), opt("factor100", Bool)]),
    stub("count", &[req("class", Class), req("type", Int)]),
    stub(
        "count_behaviourinrange",
        &[
            req("class", Class),
            req("behaviour", Int),
            opt("radius", Num),
            opt("second_class", Class),
            opt("second_id", Int),
        ],
    ),
    stub(
        "count_inrange",
        &[
            req("class", Class),
            req("type", Int),
            opt("radius", Num),
            opt("second_class", Class),
            opt("second_id", Int),
        ],
    ),
    real("count_state", &[req("state", State)]),
    stub("count_stored", &[req("class", Class), req("id", Int), opt("type", Int)]),
    stub("cracklock", &[req("text", Str), req("mode", Int), req("combination", Str)]),
    stub(
        "create",
        &[req("class", Class), req("type", Int), opt("x", Num), opt("z", Num), opt("amount", Int)],
    ),
    stub("credits", &[]),
    stub("cscr", &[opt("image", Str), opt("closeable", Bool)]),
    stub(
        "cscr_image",
        &[req("image", Str), req("x", Num), req("y", Num), opt("tooltip", Str), opt("script", Str)],
    ),
    stub(
        "cscr_text",
        &[
            req("text", Str),
            req("x", Num),
            req("y", Num),
            opt("color", Int),
            opt("align", Int),
            opt("tooltip", Str),
            opt("script", Str),
        ],
    ),
    stub("currentclass", &[]),
    stub("currentid", &[]),
    stub("damage", &[req("class", Class), req("id", Int), req("amount", Num)]),
    real("day", &[]),
    stub("debug", &[req("mode", Int), opt("id", Int)]),
    stub(
        "decisionwin",
        &[req("text", Str), opt("font", Int), opt("cancel", Str), opt("okay", Str), opt("image", Str)],
    ),
    stub("defparam", &[req("class", Class), req("type", Int), req("parameter", Str)]),
    stub("def_extend", &[req("class", Class), req("type", Int), req("source", Str)]),
    stub("def_free", &[req("class", Class), req("type", Int)]),
    stub("def_override", &[req("class", Class), req("type", Int), req("source", Str)]),
    stub("dialogue", &[req("start_page", Str), req("source", Str)]),
    stub("diary", &[req("title", Str), opt("source", Str)]),
    stub(
        "distance",
        &[
            req("first_class", Class),
            req("first_id", Int),
            req("second_class", Class),
            req("second_id", Int),
        ],
    ),
    stub("downloadfile", &[req("server", Str), req("path", Str), req("file", Str)]),
    real(
        "drink",
        &[opt("energy", Num), opt("hunger", Num), opt("thirst", Num), opt("exhaustion", Num)],
    ),
    real(
        "eat",
        &[opt("energy", Num), opt("hunger", Num), opt("thirst", Num), opt("exhaustion", Num)],
    ),
    stub("echo", &[req("text", Str)]),
    stub("equip", &[req("type", Int)]),
    stub("event", &[req("event", Str), req("class", Class), req("id", Int)]),
    stub(
        "exchange",
        &[req("class", Class), req("id", Int), opt("store", Bool), opt("types", List)],
    ),
    stub("exec", &[req("command", Str)]),
    stub("exists", &[req("class", Class), req("id", Int)]),
    stub("exit", &[]),
    stub(
        "explosion",
        &[
            req("x", Num),
            req("y", Num),
            req("z", Num),
            opt("radius", Num),
            opt("damage", Num),
            opt("style", Int),
        ],
    ),
    stub("extendentry", &[req("title", Str), opt("source", Str)]),
    stub("extendscript", &[req("class", Class), req("id", Int), opt("source", Str)]),
    real("extract", &[req("term", Str), req("start", Int), opt("length", Int)]),
    stub("fademusic", &[req("duration", Num)]),
    stub("fileexists", &[req("path", Str)]),
    real("find", &[req("type", Int), opt("amount", Int)]),
    stub(
        "flash",
        &[req("red", Num), req("green", Num), req("blue", Num), opt("speed", Num), opt("alpha", Num)],
    ),
    stub("free", &[req("class", Class), req("id", Int), opt("amount", Int)]),
    stub("freebutton", &[req("id", Int)]),
    stub("freeentry", &[opt("title", Str)]),
    stub("freescript", &[req("class", Class), req("id", Int)]),
    stub("freescripts", &[]),
    real("freeskill", &[req("skill", Str)]),
    stub(
        "freespace",
        &[
            req("x", Num),
            req("y", Num),
            req("z", Num),
            opt("radius", Num),
            opt("objects", Bool),
            opt("units", Bool),
            opt("items", Bool),
            opt("infos", Bool),
        ],
    ),
    stub("freestate", &[req("class", Class), req("id", Int), opt("state", State)]),
    stub(
        "freestored",
        &[req("class", Class), req("id", Int), req("type", Int), opt("amount", Int)],
    ),
    stub("freetext", &[req("id", Int)]),
    stub("freetimers", &[req("class", Class), req("id", Int), opt("source", Str)]),
    stub("freeunitpath", &[req("unit", Int)]),
    real("freevar", &[req("variables", List)]),
    stub("freevars", &[opt("locals", Bool)]),
    stub("freeze", &[opt("unit", Int), opt("mode", Int)]),
    stub("fry", &[]),
    stub("fx", &[req("mode", Int), opt("class", Class), opt("id", Int)]),
    stub("getamount", &[req("id", Int)]),
    stub("getlocal", &[req("class", Class), req("id", Int), req("variable", Str)]),
    stub("getoff", &[]),
    stub("getpitch", &[req("class", Class), req("id", Int)]),
    real("getplayerammo", &[]),
    real("getplayervalue", &[req("value", Int)]),
    real("getplayerweapon", &[]),
    stub("getroll", &[req("class", Class), req("id", Int)]),
    real("getsetting", &[req("setting", Str)]),
    stub(
        "getstatevalue",
        &[req("class", Class), req("id", Int), req("state", State), opt("value", Num)],
    ),
    stub("getstored", &[req("class", Class), req("id", Int), opt("type", Int)]),
    real("getweather", &[]),
    stub("getx", &[req("class", Class), req("id", Int)]),
    stub("gety", &[req("class", Class), req("id", Int)]),
    stub("getyaw", &[req("class", Class), req("id", Int)]),
    stub("getz", &[req("class", Class), req("id", Int)]),
    real("gotskill", &[req("skill", Str)]),
    stub("gotstate", &[req("class", Class), req("id", Int), req("state", State)]),
    stub("grasscolor", &[req("red", Num), req("green", Num), req("blue", Num)]),
    stub("growtime", &[req("type", Int)]),
    stub("gt", &[]),
    real("heal", &[req("class", Class), req("id", Int), req("value", Num)]),
    real("health", &[req("class", Class), req("id", Int), opt("change", Num)]),
    stub("hidebar", &[req("time", Num)]),
    stub("hideindicator", &[req("id", Int)]),
    stub("hideindicators", &[]),
    stub("hit_damage", &[]),
    stub("hit_weapon", &[]),
    real("hour", &[]),
    stub(
        "image",
        &[req("id", Int), req("image", Str), req("x", Num), req("y", Num), opt("masked", Bool)],
    ),
    stub("imagewin", &[req("image", Str)]),
    stub("impact_amount", &[]),
    stub("impact_class", &[]),
    stub("impact_first", &[]),
    stub("impact_ground", &[]),
    stub("impact_id", &[]),
    stub("impact_kill", &[]),
    stub("impact_x", &[]),
    stub("impact_y", &[]),
    stub("impact_z", &[]),
    stub("inarea", &[req("class", Class), req("id", Int)]),
    stub("inarea_dig", &[req("class", Class), req("id", Int)]),
    stub("inarea_fish", &[req("class", Class), req("id", Int)]),
    stub("inarea_freshwater", &[req("class", Class), req("id", Int)]),
    real("incskill", &[req("skill", Str), opt("value", Num), opt("description", Str)]),
    stub("info_loudspeaker", &[req("info", Int), req("file", Str), opt("radius", Num)]),
    stub(
        "info_spawncontrol",
        &[
            req("info", Int),
            req("radius", Num),
            req("class", Class),
            req("type", Int),
            req("part", Int),
            req("max_parts", Int),
            req("days", Int),
        ],
    ),
    stub(
        "info_sprite",
        &[
            req("info", Int),
            opt("file", Str),
            opt("x", Num),
            opt("y", Num),
            opt("r", Num),
            opt("g", Num),
            opt("b", Num),
            opt("alpha", Num),
            opt("blend", Int),
            opt("fix", Bool),
        ],
    ),
    stub(
        "inputwin",
        &[req("text", Str), opt("font", Int), opt("cancel", Str), opt("okay", Str), opt("image", Str)],
    ),
    stub(
        "inrange",
        &[
            req("class", Class),
            req("id", Int),
            opt("radius", Num),
            opt("second_class", Class),
            opt("second_id", Int),
        ],
    ),
    real("int", &[req("value", Any)]),
    stub(
        "intersect",
        &[
            req("first_class", Class),
            req("first_id", Int),
            opt("second_class", Class),
            opt("second_id", Int),
        ],
    ),
    stub("inview", &[req("class", Class), req("id", Int)]),
    real("jade", &[req("amount", Num)]),
    real("join", &[req("terms", List)]),
    real("jumpfactor", &[req("factor", Num)]),
    real("jumptime", &[req("time", Num)]),
    real("kill", &[req("unit", Int)]),
    stub("lastbuildingsite", &[]),
    real("length", &[req("term", Str)]),
    stub("lensflares", &[req("enabled", Bool)]),
    stub("lives", &[req("class", Class), req("id", Int)]),
    stub(
        "loadani",
        &[req("unit_type", Int), req("start_frame", Int), req("end_frame", Int)],
    ),
    stub("loadfile", &[req("file", Str), opt("range", Str)]),
    stub(
        "loadmap",
        &[
            req("map", Str),
            opt("skills", Bool),
            opt("items", Bool),
            opt("variables", Bool),
            opt("diary", Bool),
            opt("states", Bool),
            opt("build_locks", Bool),
        ],
    ),
    stub("loadmaptakeover", &[]),
    stub("loadvars", &[opt("file", Str)]),
    stub("lockbuilding", &[req("building", Int)]),
    stub("lockbuildings", &[]),
    stub("lockcombi", &[req("combination", Int)]),
    stub("lockcombis", &[]),
    stub("locked", &[req("id", Int)]),
    stub("loop_id", &[]),
    stub("map", &[]),
    stub("mapsize", &[]),
    stub("maxhealth", &[req("class", Class), req("id", Int), opt("change", Num)]),
    stub("menu", &[]),
    real("minute", &[]),
    stub("mkdir", &[req("directory", Str)]),
    stub("model", &[req("model", Str), opt("class", Class), opt("id", Int)]),
    stub("modifyentry", &[req("title", Str), opt("source", Str)]),
    stub("modifyentryline", &[req("title", Str), req("line", Int), req("text", Str)]),
    stub("movecam", &[req("time", Num), req("target_time", Num), req("id", Int)]),
    stub("msg", &[req("message", Str), opt("font", Int), opt("duration", Num)]),
    stub("msgbox", &[req("title", Str), opt("source", Str)]),
    stub("msgwin", &[req("text", Str), opt("font", Int), opt("image", Str)]),
    stub("msg_extend", &[req("source", Str)]),
    stub("msg_replace", &[req("original", Str), req("replacement", Str)]),
    real("music", &[req("file", Str), opt("volume", Num), opt("fade", Num)]),
    real("musicvolume", &[req("volume", Num)]),
    stub("name", &[req("class", Class), req("id", Int)]),
    stub("parent_class", &[req("item", Int)]),
    stub("parent_id", &[req("item", Int)]),
    stub(
        "particle",
        &[
            req("x", Num),
            req("y", Num),
            req("z", Num),
            req("type", Int),
            opt("size", Num),
            opt("alpha", Num),
        ],
    ),
    stub("particlec", &[req("red", Num), req("green", Num), req("blue", Num)]),
    stub(
        "pastechildren",
        &[
            req("class", Class),
            req("id", Int),
            opt("variables", Bool),
            opt("items", Bool),
            opt("states", Bool),
            opt("script", Bool),
        ],
    ),
    stub(
        "play",
        &[req("file", Str), opt("volume", Num), opt("pan", Num), opt("pitch", Num)],
    ),
    stub("playerdistance", &[req("class", Class), req("id", Int)]),
    stub("playergotitem", &[req("type", Int)]),
    stub("playerspotted", &[]),
    real("player_ammo", &[req("ammo", Int)]),
    stub("player_attackrange", &[req("value", Num)]),
    real("player_damage", &[req("value", Num)]),
    stub("player_mat", &[req("material", Int)]),
    real("player_maxweight", &[req("value", Num)]),
    real("player_speed", &[req("value", Num)]),
    real("player_weapon", &[req("type", Int)]),
    stub("process", &[req("title", Str), opt("time", Num), opt("event", Str)]),
    stub(
        "projectile",
        &[
            req("type", Int),
            req("x", Num),
            req("y", Num),
            req("z", Num),
            req("mode", Int),
            req("param", Num),
            opt("offset", Num),
            opt("weapon", Int),
            opt("speed", Num),
            opt("damage", Num),
            opt("drag", Num),
        ],
    ),
    stub("quickload", &[]),
    stub("quicksave", &[]),
    real("quit", &[]),
    real("rainratio", &[req("percent", Num)]),
    real("random", &[req("min_or_max", Num), opt("max", Num)]),
    stub(
        "randomcreate",
        &[
            req("class", Class),
            req("type", Int),
            opt("min_y", Num),
            opt("max_y", Num),
            opt("amount", Int),
        ],
    ),
    stub("rename", &[req("current", Str), req("new", Str)]),
    real("replace", &[req("term", Str), req("current", Str), req("new", Str)]),
    stub("revive", &[req("unit", Int)]),
    stub("ride", &[req("unit", Int)]),
    stub("riding", &[]),
    stub(
        "rpos",
        &[
            req("class", Class),
            req("id", Int),
            req("x", Num),
            req("y", Num),
            req("z", Num),
            req("pitch", Num),
            req("yaw", Num),
            req("roll", Num),
        ],
    ),
    stub(
        "savemap",
        &[
            req("map", Str),
            opt("skills", Bool),
            opt("items", Bool),
            opt("variables", Bool),
            opt("diary", Bool),
            opt("states", Bool),
            opt("build_locks", Bool),
        ],
    ),
    stub("savemapimage", &[req("path", Str), opt("size", Num)]),
    stub("savevars", &[opt("file", Str), opt("variables", List)]),
    stub(
        "scale",
        &[req("x", Num), req("y", Num), req("z", Num), opt("class", Class), opt("id", Int)],
    ),
    stub("scantarget", &[opt("distance", Num)]),
    stub("selectplace", &[req("text", Str), opt("camera_height", Num)]),
    stub("selectplace_x", &[]),
    stub("selectplace_y", &[]),
    stub("selectplace_z", &[]),
    stub("seqbar", &[req("time", Num), req("mode", Int)]),
    stub(
        "seqcls",
        &[req("time", Num), req("mode", Int), opt("red", Num), opt("green", Num), opt("blue", Num)],
    ),
    stub("seqend", &[req("time", Num)]),
    stub(
        "seqevent",
        &[req("time", Num), req("event", Str), req("class", Class), req("id", Int)],
    ),
    stub(
        "seqfade",
        &[
            req("start_time", Num),
            req("end_time", Num),
            opt("red", Num),
            opt("green", Num),
            opt("blue", Num),
            opt("mode", Int),
        ],
    ),
    stub(
        "seqflash",
        &[
            req("time", Num),
            opt("red", Num),
            opt("green", Num),
            opt("blue", Num),
            opt("speed", Num),
            opt("alpha", Num),
        ],
    ),
    stub("seqhideplayer", &[req("time", Num), opt("hide", Bool)]),
    stub("seqimage", &[req("time", Num), req("image", Str), opt("masked", Bool)]),
    stub(
        "seqimagetext",
        &[
            req("time", Num),
            req("text", Str),
            req("x", Num),
            req("y", Num),
            opt("color", Int),
            opt("direction", Int),
        ],
    ),
    stub("seqmsg", &[req("time", Num), req("text", Str), opt("color", Int)]),
    stub("seqmsgclear", &[req("time", Num), opt("position", Int)]),
    stub("seqscript", &[req("time", Num), req("source", Str)]),
    stub(
        "seqsound",
        &[req("time", Num), req("file", Str), opt("volume", Num), opt("pan", Num), opt("pitch", Num)],
    ),
    stub("seqstart", &[opt("show_bars", Bool), opt("can_skip", Bool)]),
    stub("seqtimemode", &[req("mode", Int), opt("absolute", Bool)]),
    stub("setamount", &[req("id", Int), req("amount", Int)]),
    stub(
        "setat",
        &[req("class", Class), req("id", Int), req("target_class", Class), req("target_id", Int)],
    ),
    stub("setcam", &[req("time", Num), req("id", Int)]),
    real("setday", &[req("day", Int)]),
    real("sethour", &[req("hour", Int)]),
    stub("setindicatorinfo", &[req("id", Int), req("text", Str)]),
    stub("setindicatorlook", &[req("id", Int), req("look", Int)]),
    stub(
        "setlocal",
        &[req("class", Class), req("id", Int), req("variable", Str), opt("value", Any)],
    ),
    real("setminute", &[req("minute", Int)]),
    stub(
        "setpos",
        &[req("class", Class), req("id", Int), req("x", Num), req("y", Num), req("z", Num)],
    ),
    stub(
        "setrot",
        &[req("class", Class), req("id", Int), req("pitch", Num), req("yaw", Num), req("roll", Num)],
    ),
    real("setskill", &[req("skill", Str), opt("value", Num), opt("description", Str)]),
    stub("shininess", &[req("value", Num), opt("class", Class), opt("id", Int)]),
    stub("showbar", &[req("time", Num)]),
    stub("showentry", &[req("title", Str), opt("sfx", Str)]),
    stub("showindicator", &[req("id", Int)]),
    stub("showindicators", &[]),
    real("sin", &[req("value", Num), opt("factor100", Bool)]),
    real("skillname", &[req("skill", Str), req("description", Str)]),
    real("skillvalue", &[req("skill", Str)]),
    stub("skip", &[]),
    stub("skipevent", &[]),
    stub(
        "skycolor",
        &[
            req("mode", Int),
            opt("red", Num),
            opt("green", Num),
            opt("blue", Num),
            opt("transparency", Num),
        ],
    ),
    stub("skytexture", &[req("texture", Str)]),
    real("sleep", &[]),
    real("sleeping", &[]),
    real("snowratio", &[req("percent", Num)]),
    stub("spawntimer", &[req("object", Int), opt("value", Num)]),
    stub("speech", &[req("file", Str), opt("cancel", Bool), opt("value", Num)]),
    real("split", &[req("term", Str), req("delimiter", Str), req("part", Int)]),
    stub("starttrigger", &[req("id", Int)]),
    stub("starttriggers", &[]),
    stub("state", &[]),
    stub(
        "statecolor",
        &[
            req("class", Class),
            req("id", Int),
            req("state", State),
            req("red", Num),
            req("green", Num),
            req("blue", Num),
        ],
    ),
    stub(
        "statesize",
        &[req("class", Class), req("id", Int), req("state", State), req("size", Num)],
    ),
    stub(
        "statevalue",
        &[req("class", Class), req("id", Int), req("state", State), req("value", Num)],
    ),
    real("stopmusic", &[]),
    stub("stopsounds", &[]),
    stub("stoptrigger", &[req("id", Int)]),
    stub("stoptriggers", &[]),
    stub("storage", &[req("class", Class), req("id", Int), opt("mode", Int)]),
    stub(
        "store",
        &[req("item", Int), req("class", Class), req("id", Int), req("outside", Int)],
    ),
    real("tan", &[req("value", Num), opt("factor100", Bool)]),
    stub("targetclass", &[]),
    stub("targetdistance", &[]),
    stub("targetid", &[]),
    stub("targetx", &[]),
    stub("targety", &[]),
    stub("targetz", &[]),
    stub("tempall", &[]),
    stub("terrain", &[req("x", Num), req("z", Num), req("mode", Int), opt("height", Num)]),
    stub("terraintexture", &[req("file", Str), opt("grass", Bool)]),
    stub("terrainy", &[req("x", Num), req("z", Num)]),
    stub(
        "text",
        &[
            req("id", Int),
            req("text", Str),
            opt("font", Int),
            opt("x", Num),
            opt("y", Num),
            opt("align", Int),
        ],
    ),
    stub(
        "text3d",
        &[
            req("class", Class),
            req("id", Int),
            req("text", Str),
            opt("font", Int),
            opt("offset", Num),
            opt("view_range", Num),
        ],
    ),
    stub("texture", &[req("texture", Str), opt("class", Class), opt("id", Int)]),
    stub("thunder", &[]),
    stub("timedcampath", &[req("time", Num), req("steps", List)]),
    stub(
        "timer",
        &[
            req("class", Class),
            req("id", Int),
            req("duration", Num),
            opt("loops", Int),
            opt("source", Str),
        ],
    ),
    stub("timercount", &[req("class", Class), req("id", Int)]),
    stub("trigger", &[req("id", Int)]),
    real("trim", &[req("term", Str)]),
    stub("type", &[req("class", Class), req("id", Int)]),
    stub("unitpath", &[req("unit", Int), req("path_ids", List)]),
    stub("unlockbuilding", &[req("building", Int)]),
    stub("unlockbuildings", &[]),
    stub("unlockcombi", &[req("combination", Int)]),
    stub("unlockcombis", &[]),
    stub("unstore", &[req("item", Int), opt("amount", Int)]),
    stub("use_x", &[]),
    stub("use_y", &[]),
    stub("use_z", &[]),
    stub("varexists", &[req("variable", Str)]),
    stub(
        "viewline",
        &[
            req("x1", Num),
            req("y1", Num),
            req("z1", Num),
            req("x2", Num),
            req("y2", Num),
            req("z2", Num),
        ],
    ),
    stub("vomit", &[req("unit", Int)]),
    real("wateralpha", &[req("alpha", Num)]),
    stub("watertexture", &[req("texture", Str)]),
    real("weather", &[req("weather", Weather)]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for spec in all() {
            assert!(seen.insert(spec.name), "duplicate command {}", spec.name);
        }
    }

    #[test]
    fn optional_params_trail_required_ones() {
        for spec in all() {
            let mut saw_optional = false;
            for param in spec.params {
                if param.required {
                    assert!(
                        !saw_optional,
                        "{}: required `{}` after an optional parameter",
                        spec.name, param.name
                    );
                } else {
                    saw_optional = true;
                }
            }
        }
    }

    #[test]
    fn find_resolves_known_names_only() {
        assert!(find("heal").is_some());
        assert!(find("sethour").is_some());
        assert!(find("teleport").is_none());
    }

    #[test]
    fn catalogue_covers_the_full_surface() {
        assert!(all().len() > 220, "catalogue lost entries: {}", all().len());
        let implemented = all().iter().filter(|spec| !spec.noop).count();
        assert!(implemented >= 60, "implemented set shrank: {implemented}");
    }
}
