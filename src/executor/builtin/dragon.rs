// src/executor/builtin/dragon.rs
use std::io::Write;

const DRAGON: &str = r#"
                                                   /===-_---~~~~~~~~~------____
                                                  |===-~___                _,-'
                   -==\\                         `//~\\   ~~~~`---.___.-~~
               ______-==|                         | |  \\           _-~`
         __--~~~  ,-/-==\\                        | |   `\        ,'
      _-~       /'    |  \\                      / /      \      /
    .'        /       |   \\                   /' /        \   /'
   /  ____  /         |    \`\.__/-~~ ~ \ _ _/'  /          \/'
  /-'~    ~~~~~---__  |     ~-/~         ( )   /'        _--~`
                    \_|      /        _)   ;  ),   __--~~
                      '~~--_/      _-~/-  / \   '-~ \
                     {\__--_/}    / \\_>- )<__\      \
                     /'   (_/  _-~  | |__>--<__|      |
                    |0  0 _/) )-~     | |__>--<__|     |
                    / /~ ,_/       / /__>---<__/      |
                   o o _//        /-~_>---<__-~      /
                   (^(~          /~_>---<__-      _-~
                  ,/|           /__>--<__/     _-~
               ,//('(          |__>--<__|     /                  .----_
              ( ( '))          |__>--<__|    |                 /' _---_~\
           `-)) )) (           |__>--<__|    |               /'  /     ~\`\
          ,/,'//( (             \__>--<__\    \            /'  //        ||
        ,( ( ((, ))              ~-__>--<_~-_  ~--____---~' _/'/        /'
      `~/  )` ) ,/|                 ~-_~>--<_/-__       __-~ _/
    ._-~//( )/ )) `                    ~~-'_/_/ /~~~~~~~__--~
     ;'( ')/ ,)(                              ~~~~~~~~~~
    ' ') '( (/
      '   '  `
"#;

pub fn print_dragon(out: &mut dyn Write) {
    if let Err(e) = out.write_all(DRAGON.as_bytes()).and_then(|_| out.flush()) {
        tracing::warn!(error = %e, "dragon: failed to write");
    }
}
